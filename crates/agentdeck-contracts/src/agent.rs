//! Agent record and identity types.
//!
//! These types define the data the console hands to the provisioning backend.
//! Field names on the wire follow the backend's JSON contract (`subAgents`,
//! `session_id`, `llmData`, `type`), so the Rust names are mapped with serde.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::llm::LlmType;

/// The four kinds of agent the console knows about.
///
/// The kind decides which other fields of an [`Agent`] are meaningful and
/// which roster entries may be picked as its sub-agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentKind {
    /// A remote MCP tool server.
    #[serde(rename = "mcp")]
    Mcp,
    /// A locally hosted, LLM-backed agent.
    #[serde(rename = "local_agent")]
    LocalAgent,
    /// A peer agent reachable over the agent-to-agent protocol.
    #[serde(rename = "a2a_agent")]
    A2aAgent,
    /// A supervisor that delegates to a set of sub-agents.
    #[serde(rename = "orchestrator")]
    Orchestrator,
}

impl AgentKind {
    /// Every kind, in the order the console lists them.
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Mcp,
        AgentKind::LocalAgent,
        AgentKind::A2aAgent,
        AgentKind::Orchestrator,
    ];

    /// The wire string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Mcp => "mcp",
            AgentKind::LocalAgent => "local_agent",
            AgentKind::A2aAgent => "a2a_agent",
            AgentKind::Orchestrator => "orchestrator",
        }
    }

    /// The kind of roster entry this kind may select as a sub-agent.
    ///
    /// Local agents compose MCP servers; orchestrators supervise A2A agents.
    /// Leaf kinds have no sub-agents.
    pub fn sub_agent_kind(self) -> Option<AgentKind> {
        match self {
            AgentKind::LocalAgent => Some(AgentKind::Mcp),
            AgentKind::Orchestrator => Some(AgentKind::A2aAgent),
            AgentKind::Mcp | AgentKind::A2aAgent => None,
        }
    }

    /// True for kinds that carry an `llmData` block.
    pub fn carries_llm(self) -> bool {
        matches!(self, AgentKind::LocalAgent | AgentKind::Orchestrator)
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque conversation/thread identifier supplied by the calling context.
///
/// The console never interprets it; it is copied into every record it builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite identity used when selecting sub-agents.
///
/// Two roster entries are the same selection target only when both the name
/// and the url are equal. The fields are kept apart so that `("AB", "C")` and
/// `("A", "BC")` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentKey {
    pub name: String,
    pub url: String,
}

impl AgentKey {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for AgentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.url.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}@{}", self.name, self.url)
        }
    }
}

/// Language-model settings attached to local agents and orchestrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmData {
    #[serde(rename = "llmType")]
    pub llm_type: LlmType,
    /// Parsed `KEY=VALUE` configuration block.
    #[serde(rename = "llmConfig")]
    pub llm_config: BTreeMap<String, String>,
}

/// A finished agent definition.
///
/// Built once, when the operator confirms creation, and never mutated by the
/// console afterwards. `usage` belongs to the registry that hosts the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    /// Connection target. Empty for local agents.
    #[serde(default)]
    pub url: String,
    /// Agents this one supervises or depends on. Not owned: they stay in the
    /// registry independently.
    #[serde(rename = "subAgents", default)]
    pub sub_agents: Vec<Agent>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AgentKind,
    #[serde(default)]
    pub session_id: SessionId,
    #[serde(default)]
    pub usage: u64,
    #[serde(rename = "llmData", default, skip_serializing_if = "Option::is_none")]
    pub llm_data: Option<LlmData>,
}

impl Agent {
    /// The selection key for this record.
    pub fn key(&self) -> AgentKey {
        AgentKey::new(self.name.clone(), self.url.clone())
    }
}
