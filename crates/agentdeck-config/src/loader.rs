//! Loading and applying console configuration.
//!
//! `ConsoleConfig::from_toml_str` / `from_file` parse and check the file;
//! `local_draft` / `orchestrator_draft` start drafts with the configured
//! defaults applied.

use std::path::Path;

use tracing::debug;

use agentdeck_contracts::{
    agent::SessionId,
    error::{DeckError, DeckResult},
};
use agentdeck_core::AgentDraft;

use crate::settings::ConsoleConfig;

impl ConsoleConfig {
    /// Parse `s` as TOML and check the result.
    ///
    /// Returns `DeckError::ConfigError` if the TOML is malformed, does not
    /// match the expected schema, or names a non-http backend.
    pub fn from_toml_str(s: &str) -> DeckResult<Self> {
        let config: ConsoleConfig = toml::from_str(s).map_err(|e| DeckError::ConfigError {
            reason: format!("failed to parse console TOML: {}", e),
        })?;
        config.check()?;
        debug!(
            base_url = %config.backend.base_url,
            timeout_secs = config.backend.timeout_secs,
            "console configuration loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as console configuration.
    pub fn from_file(path: &Path) -> DeckResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DeckError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    fn check(&self) -> DeckResult<()> {
        let base = self.backend.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(DeckError::ConfigError {
                reason: format!("backend.base_url '{}' must be an http or https url", base),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(DeckError::ConfigError {
                reason: "backend.timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// A local agent draft with the configured starting instructions.
    pub fn local_draft(&self, session_id: SessionId) -> AgentDraft {
        let draft = AgentDraft::local(session_id);
        match &self.local_agent.instructions {
            Some(instructions) => draft.with_instructions(instructions.clone()),
            None => draft,
        }
    }

    /// An orchestrator draft pointed at the configured endpoint.
    pub fn orchestrator_draft(&self, session_id: SessionId) -> AgentDraft {
        AgentDraft::orchestrator(session_id).with_url(self.orchestrator.url.clone())
    }
}
