//! Console configuration schema.
//!
//! A `ConsoleConfig` is deserialized from TOML. Every table and field is
//! optional; missing values fall back to the defaults the console ships with.
//!
//! Example:
//! ```toml
//! [backend]
//! base_url = "http://localhost:8000"
//! timeout_secs = 30
//!
//! [orchestrator]
//! url = "http://localhost:8083"
//!
//! [local_agent]
//! instructions = "You are a careful research assistant."
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use agentdeck_core::builder::DEFAULT_ORCHESTRATOR_URL;

/// Where the provisioning backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base url the two endpoint paths are appended to.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Defaults applied to new orchestrator drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorDefaults {
    /// Endpoint recorded as the orchestrator's `url`.
    pub url: String,
}

impl Default for OrchestratorDefaults {
    fn default() -> Self {
        Self {
            url: DEFAULT_ORCHESTRATOR_URL.to_string(),
        }
    }
}

/// Defaults applied to new local agent drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalAgentDefaults {
    /// Replaces the stock starting instructions when set.
    pub instructions: Option<String>,
}

/// The top-level structure deserialized from a console TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub backend: BackendConfig,
    pub orchestrator: OrchestratorDefaults,
    pub local_agent: LocalAgentDefaults,
}
