//! # agentdeck-config
//!
//! TOML-driven configuration for the agentdeck console.
//!
//! ## Overview
//!
//! This crate provides [`ConsoleConfig`], which describes where the
//! provisioning backend lives and which defaults new drafts start with.
//! Every field is optional; an empty file yields the shipped defaults.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use agentdeck_config::ConsoleConfig;
//!
//! let config = ConsoleConfig::from_file(Path::new("agentdeck.toml"))?;
//! let draft = config.orchestrator_draft(session_id);
//! ```

pub mod loader;
pub mod settings;

pub use settings::{BackendConfig, ConsoleConfig, LocalAgentDefaults, OrchestratorDefaults};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::time::Duration;

    use agentdeck_contracts::{agent::SessionId, error::DeckError};
    use agentdeck_core::builder::{DEFAULT_LOCAL_INSTRUCTIONS, DEFAULT_ORCHESTRATOR_URL};

    use crate::ConsoleConfig;

    // ── 1. defaults ───────────────────────────────────────────────────────────

    /// An empty document yields the shipped defaults.
    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ConsoleConfig::from_toml_str("").unwrap();

        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.orchestrator.url, DEFAULT_ORCHESTRATOR_URL);
        assert!(config.local_agent.instructions.is_none());
    }

    // ── 2. partial tables ─────────────────────────────────────────────────────

    /// A table that sets one field keeps the defaults for the rest.
    #[test]
    fn test_partial_backend_table() {
        let toml = r#"
            [backend]
            base_url = "https://provisioner.internal"
        "#;

        let config = ConsoleConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.backend.base_url, "https://provisioner.internal");
        assert_eq!(config.backend.timeout_secs, 30);
    }

    // ── 3. drafts pick up configured defaults ─────────────────────────────────

    #[test]
    fn test_orchestrator_draft_uses_configured_url() {
        let toml = r#"
            [orchestrator]
            url = "http://orchestrators:9000"
        "#;

        let config = ConsoleConfig::from_toml_str(toml).unwrap();
        let draft = config.orchestrator_draft(SessionId::new("s"));
        assert_eq!(draft.url(), "http://orchestrators:9000");
    }

    #[test]
    fn test_local_draft_instructions_override() {
        let toml = r#"
            [local_agent]
            instructions = "Answer in French."
        "#;

        let config = ConsoleConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            config.local_draft(SessionId::new("s")).instructions(),
            "Answer in French."
        );

        let stock = ConsoleConfig::default().local_draft(SessionId::new("s"));
        assert_eq!(stock.instructions(), DEFAULT_LOCAL_INSTRUCTIONS);
    }

    // ── 4. rejection ──────────────────────────────────────────────────────────

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = ConsoleConfig::from_toml_str("[backend\nbase_url = 1").unwrap_err();
        match err {
            DeckError::ConfigError { reason } => {
                assert!(reason.contains("failed to parse console TOML"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_non_http_backend_is_rejected() {
        let toml = r#"
            [backend]
            base_url = "localhost:8000"
        "#;
        assert!(matches!(
            ConsoleConfig::from_toml_str(toml),
            Err(DeckError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let toml = r#"
            [backend]
            timeout_secs = 0
        "#;
        assert!(matches!(
            ConsoleConfig::from_toml_str(toml),
            Err(DeckError::ConfigError { .. })
        ));
    }

    // ── 5. files ──────────────────────────────────────────────────────────────

    #[test]
    fn test_from_file_reads_toml() {
        let path = std::env::temp_dir().join(format!(
            "agentdeck-config-test-{}.toml",
            std::process::id()
        ));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "[backend]\ntimeout_secs = 5").unwrap();
        }

        let config = ConsoleConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.backend.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ConsoleConfig::from_file(std::path::Path::new("/nonexistent/agentdeck.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
