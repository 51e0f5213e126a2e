//! # agentdeck-contracts
//!
//! Shared agent records, LLM provider types, wire messages, and error types
//! for the agentdeck console.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod agent;
pub mod error;
pub mod llm;
pub mod outcome;
