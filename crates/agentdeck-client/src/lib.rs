//! # agentdeck-client
//!
//! [`HttpBackend`] implements `ProvisioningBackend` over HTTP/JSON against
//! the provisioning service's `/check-orchestrator-name` and
//! `/create-multi-agent` endpoints.

pub mod http;

pub use http::HttpBackend;
