//! In-memory implementation of `AgentRoster`.
//!
//! `InMemoryRoster` is the reference roster used by the CLI and the tests.
//! It keeps agents in display order and stamps each registration with the
//! time it happened.

use chrono::{DateTime, Utc};
use tracing::info;

use agentdeck_contracts::{
    agent::Agent,
    error::{DeckError, DeckResult},
};

use crate::traits::AgentRoster;

/// One registered agent plus when it was added.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub agent: Agent,
    pub registered_at: DateTime<Utc>,
}

/// A roster held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    entries: Vec<RosterEntry>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a roster with existing agents, keeping their order.
    pub fn from_agents(agents: impl IntoIterator<Item = Agent>) -> Self {
        let now = Utc::now();
        let entries = agents
            .into_iter()
            .map(|agent| RosterEntry {
                agent,
                registered_at: now,
            })
            .collect();
        Self { entries }
    }

    /// Load a roster from a JSON array of agent records.
    ///
    /// Returns `DeckError::InvalidInput` when the document is not an array of
    /// agents.
    pub fn from_json_str(s: &str) -> DeckResult<Self> {
        let agents: Vec<Agent> = serde_json::from_str(s).map_err(|e| DeckError::InvalidInput {
            reason: format!("failed to parse roster JSON: {e}"),
        })?;
        Ok(Self::from_agents(agents))
    }

    /// Every entry with its registration time.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AgentRoster for InMemoryRoster {
    fn agents(&self) -> Vec<Agent> {
        self.entries.iter().map(|e| e.agent.clone()).collect()
    }

    fn register(&mut self, agent: Agent) {
        info!(
            name = %agent.name,
            kind = %agent.kind,
            roster_size = self.entries.len() + 1,
            "agent registered"
        );
        self.entries.push(RosterEntry {
            agent,
            registered_at: Utc::now(),
        });
    }
}
