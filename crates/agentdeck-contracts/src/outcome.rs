//! Backend wire messages and workflow outcome types.
//!
//! `NameCheckRequest`/`NameCheckResponse` and `CreateResponse` mirror the two
//! provisioning endpoints. `CreationOutcome` is what the orchestrator workflow
//! hands back to the front end.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DeckError;

/// Body of `POST /check-orchestrator-name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCheckRequest {
    pub name: String,
}

/// Response of `POST /check-orchestrator-name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCheckResponse {
    #[serde(rename = "isUnique")]
    pub is_unique: bool,
}

/// Response of `POST /create-multi-agent`.
///
/// `agentUrls` is opaque to the console and passed through unchanged. A
/// reply without it stays `None`, so the outcome omits `received` too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResponse {
    #[serde(rename = "agentUrls", default, skip_serializing_if = "Option::is_none")]
    pub agent_urls: Option<Value>,
}

/// Identifier for one run of the orchestrator creation workflow.
///
/// Appears in every log line the workflow emits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(pub uuid::Uuid);

impl WorkflowId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of an orchestrator creation attempt, in the shape the front end
/// expects: `{success: true, received}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationOutcome {
    pub success: bool,
    /// The backend's `agentUrls` value on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
    /// Operator-facing reason on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CreationOutcome {
    pub fn created(received: Option<Value>) -> Self {
        Self {
            success: true,
            received,
            error: None,
        }
    }

    pub fn failed(err: &DeckError) -> Self {
        Self {
            success: false,
            received: None,
            error: Some(err.to_string()),
        }
    }
}
