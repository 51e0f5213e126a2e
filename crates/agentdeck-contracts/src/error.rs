//! Error types for the agentdeck console core.
//!
//! Every fallible operation returns `DeckResult<T>`. The `Display` text of
//! each variant is the message shown to the operator, so front ends can print
//! it as-is.

use thiserror::Error;

use crate::agent::AgentKind;

/// The unified rejection type for agent creation workflows.
///
/// Nothing here is fatal to the process: the worst outcome is that a creation
/// did not happen and the operator is told why.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The proposed agent name contains a forbidden special character.
    /// The stored name is left untouched.
    #[error("{} (found '{character}')", name_rejected_message(.kind))]
    NameRejected { character: char, kind: AgentKind },

    /// An agent with the same name is already in the local roster.
    #[error("{}", duplicate_message(.kind))]
    DuplicateName { name: String, kind: AgentKind },

    /// The backend confirmed that an orchestrator with this name exists.
    #[error("Orchestrator with the given name already exists. Please use a different name.")]
    DuplicateOrchestratorName { name: String },

    /// The operator renamed or added configuration keys.
    #[error("You cannot change the key names. Only edit the values after the equals sign.")]
    KeySetMismatch { unexpected: Vec<String> },

    /// The configuration block has no parsable `KEY=VALUE` line.
    #[error("The LLM Configuration string format is incorrect")]
    MalformedConfig,

    /// A backend call failed at the transport, status, or decoding level.
    #[error("request to '{endpoint}' failed: {reason}")]
    RemoteCallFailed { endpoint: String, reason: String },

    /// A field required for this kind of agent is blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// An MCP entry url is not an http(s) address.
    #[error("'{url}' is not a valid http or https url")]
    InvalidUrl { url: String },

    /// The draft was already turned into an agent record.
    #[error("this draft has already been submitted")]
    DraftSubmitted,

    /// The named LLM provider is not one the console supports.
    #[error("unknown LLM type '{value}'")]
    UnknownLlmType { value: String },

    /// A roster document or command-line argument could not be understood.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Console configuration is missing or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl DeckError {
    /// True when the operator can fix the input and try again in the same
    /// session. Only configuration failures need a restart.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DeckError::ConfigError { .. })
    }
}

fn name_rejected_message(kind: &AgentKind) -> String {
    let label = match kind {
        AgentKind::LocalAgent => "Local agent",
        AgentKind::Orchestrator => "Orchestrator",
        AgentKind::Mcp => "MCP server",
        AgentKind::A2aAgent => "A2A agent",
    };
    format!("{label} name cannot have special characters in name")
}

fn duplicate_message(kind: &AgentKind) -> String {
    let label = match kind {
        AgentKind::LocalAgent => "A local agent",
        AgentKind::Orchestrator => "An orchestrator",
        AgentKind::Mcp => "An MCP server",
        AgentKind::A2aAgent => "An A2A agent",
    };
    format!("{label} with this name already exists. Please choose a different name.")
}

/// Convenience alias used throughout the agentdeck crates.
pub type DeckResult<T> = Result<T, DeckError>;
