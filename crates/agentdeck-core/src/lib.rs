//! # agentdeck-core
//!
//! The validation and composition core of the agentdeck console.
//!
//! This crate provides:
//! - The collaborator traits (`AgentRoster`, `ProvisioningBackend`)
//! - Provider templates and `KEY=VALUE` block validation
//! - The `AgentDraft` state machine for local agents and orchestrators, and
//!   `McpDraft` for MCP entries
//! - The `UniquenessChecker` that runs the orchestrator creation protocol
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agentdeck_core::{AgentDraft, InMemoryRoster, UniquenessChecker};
//! ```

pub mod builder;
pub mod config_block;
pub mod mcp;
pub mod name;
pub mod roster;
pub mod templates;
pub mod traits;
pub mod uniqueness;

pub use builder::{AgentDraft, DraftPhase};
pub use mcp::McpDraft;
pub use roster::InMemoryRoster;
pub use traits::{AgentRoster, ProvisioningBackend};
pub use uniqueness::UniquenessChecker;
