//! Trait seams between the console core and its collaborators.
//!
//! - `AgentRoster`         — the registry of known agents (read for candidate
//!   filtering and duplicate detection, written on successful creation)
//! - `ProvisioningBackend` — the remote service that checks orchestrator names
//!   and provisions multi-agent setups
//!
//! The core never reaches a collaborator except through these traits, so every
//! workflow can be exercised with in-memory stand-ins.

use async_trait::async_trait;
use serde_json::Value;

use agentdeck_contracts::{
    agent::{Agent, AgentKind},
    error::DeckResult,
};

/// The roster of agents the operator can see.
///
/// Drafts read a snapshot of it; only the hosting application registers new
/// records after a creation succeeds.
pub trait AgentRoster: Send + Sync {
    /// Snapshot of every known agent, in display order.
    fn agents(&self) -> Vec<Agent>;

    /// Append a newly created agent.
    fn register(&mut self, agent: Agent);

    /// Agents of a single kind, in display order.
    fn by_kind(&self, kind: AgentKind) -> Vec<Agent> {
        self.agents().into_iter().filter(|a| a.kind == kind).collect()
    }

    /// True if any agent, of any kind, already uses exactly this name.
    fn contains_name(&self, name: &str) -> bool {
        self.agents().iter().any(|a| a.name == name)
    }
}

/// The backend provisioning service.
///
/// Implementations are expected to perform exactly one request per call and
/// never retry; retry policy belongs to the caller.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    /// Ask whether `name` is free for a new orchestrator.
    async fn check_orchestrator_name(&self, name: &str) -> DeckResult<bool>;

    /// Provision `agent` and its sub-agents. Returns the backend's
    /// `agentUrls` value unchanged, or `None` when the reply has none.
    async fn create_multi_agent(&self, agent: &Agent) -> DeckResult<Option<Value>>;
}
