//! The agent draft: an explicit state machine for creating local agents and
//! orchestrators.
//!
//! A draft moves through
//!
//!   Editing → Validating → Ready → Submitted
//!
//! Any field change from `Ready` drops back to `Editing`. Once `Submitted`,
//! the draft refuses further edits; the emitted `Agent` is final.
//!
//! Every edit method returns `DeckResult<()>`. A rejected edit leaves the
//! draft exactly as it was, except for the configuration commit rule, which
//! restores the provider's default template.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use agentdeck_contracts::{
    agent::{Agent, AgentKey, AgentKind, LlmData, SessionId},
    error::{DeckError, DeckResult},
    llm::LlmType,
};

use crate::{
    config_block::{check_against_template, parse},
    name::check_name,
    templates::default_template,
    traits::AgentRoster,
};

/// Instructions a new local agent starts with.
pub const DEFAULT_LOCAL_INSTRUCTIONS: &str = "You are an AI agent.
You can call tools. Use them automatically to answer questions accurately.
Always reply in clear, human-readable language. Use simple words, short sentences, and clean formatting.
Understand the user's intent before responding.";

/// Endpoint the backend exposes newly provisioned orchestrators on.
pub const DEFAULT_ORCHESTRATOR_URL: &str = "http://localhost:8083";

/// Where a draft is in its lifecycle. Front ends receive it as a lowercase
/// string (`"editing"`, `"ready"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftPhase {
    Editing,
    Validating,
    Ready,
    Submitted,
}

/// An in-progress local agent or orchestrator definition.
#[derive(Debug, Clone)]
pub struct AgentDraft {
    kind: AgentKind,
    session_id: SessionId,
    phase: DraftPhase,
    name: String,
    url: String,
    instructions: String,
    description: String,
    llm_type: LlmType,
    llm_config: String,
    /// Selected sub-agents, in selection order. Membership is what counts.
    selected: Vec<AgentKey>,
}

impl AgentDraft {
    /// Start a local agent draft. Local agents have no url and start with
    /// the stock instructions.
    pub fn local(session_id: SessionId) -> Self {
        Self::blank(AgentKind::LocalAgent, session_id, String::new())
            .with_instructions(DEFAULT_LOCAL_INSTRUCTIONS)
    }

    /// Start an orchestrator draft pointed at `DEFAULT_ORCHESTRATOR_URL`.
    pub fn orchestrator(session_id: SessionId) -> Self {
        Self::blank(
            AgentKind::Orchestrator,
            session_id,
            DEFAULT_ORCHESTRATOR_URL.to_string(),
        )
    }

    fn blank(kind: AgentKind, session_id: SessionId, url: String) -> Self {
        let llm_type = LlmType::default();
        Self {
            kind,
            session_id,
            phase: DraftPhase::Editing,
            name: String::new(),
            url,
            instructions: String::new(),
            description: String::new(),
            llm_type,
            llm_config: default_template(llm_type).to_string(),
            selected: Vec::new(),
        }
    }

    /// Replace the starting instructions (used for configured defaults).
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Replace the connection url (used for configured orchestrator endpoints).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn llm_type(&self) -> LlmType {
        self.llm_type
    }

    /// The configuration block text as currently edited.
    pub fn llm_config(&self) -> &str {
        &self.llm_config
    }

    pub fn selected(&self) -> &[AgentKey] {
        &self.selected
    }

    pub fn is_selected(&self, key: &AgentKey) -> bool {
        self.selected.contains(key)
    }

    // ── Edits ────────────────────────────────────────────────────────────────

    /// Fail on a submitted draft; otherwise drop `Ready` back to `Editing`.
    fn begin_edit(&mut self) -> DeckResult<()> {
        if self.phase == DraftPhase::Submitted {
            return Err(DeckError::DraftSubmitted);
        }
        if self.phase != DraftPhase::Editing {
            debug!(kind = %self.kind, from = ?self.phase, "draft edited, back to editing");
            self.phase = DraftPhase::Editing;
        }
        Ok(())
    }

    /// Set the name, filtering forbidden characters on every keystroke.
    ///
    /// On `NameRejected` the previous name is kept verbatim.
    pub fn set_name(&mut self, value: &str) -> DeckResult<()> {
        if self.phase == DraftPhase::Submitted {
            return Err(DeckError::DraftSubmitted);
        }
        if let Err(e) = check_name(value, self.kind) {
            warn!(kind = %self.kind, rejected = %value, "agent name rejected");
            return Err(e);
        }
        self.begin_edit()?;
        self.name = value.to_string();
        Ok(())
    }

    pub fn set_instructions(&mut self, value: &str) -> DeckResult<()> {
        self.begin_edit()?;
        self.instructions = value.to_string();
        Ok(())
    }

    pub fn set_description(&mut self, value: &str) -> DeckResult<()> {
        self.begin_edit()?;
        self.description = value.to_string();
        Ok(())
    }

    /// Switch provider. Always resets the block to the new provider's
    /// template, discarding any unsaved edits.
    pub fn select_llm_type(&mut self, llm_type: LlmType) -> DeckResult<()> {
        self.begin_edit()?;
        debug!(from = %self.llm_type, to = %llm_type, "llm type changed, config reset");
        self.llm_type = llm_type;
        self.llm_config = default_template(llm_type).to_string();
        Ok(())
    }

    /// Replace the block text without validating it (on-change edit).
    pub fn edit_config(&mut self, text: &str) -> DeckResult<()> {
        self.begin_edit()?;
        self.llm_config = text.to_string();
        Ok(())
    }

    /// Validate the block when the operator leaves the field.
    ///
    /// A renamed or added key yields `KeySetMismatch`; a block with no usable
    /// line yields `MalformedConfig`. Either way the template is restored.
    /// A passing block is kept verbatim.
    pub fn commit_config(&mut self) -> DeckResult<()> {
        if self.phase == DraftPhase::Submitted {
            return Err(DeckError::DraftSubmitted);
        }
        let template = default_template(self.llm_type);
        match check_against_template(&self.llm_config, template) {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(
                    kind = %self.kind,
                    llm_type = %self.llm_type,
                    error = %e,
                    "config block rejected, restoring template"
                );
                self.llm_config = template.to_string();
                self.phase = DraftPhase::Editing;
                Err(e)
            }
        }
    }

    // ── Sub-agent selection ──────────────────────────────────────────────────

    /// Roster entries this draft may pick as sub-agents, in roster order.
    pub fn candidates(&self, roster: &dyn AgentRoster) -> Vec<Agent> {
        match self.kind.sub_agent_kind() {
            Some(kind) => roster.by_kind(kind),
            None => Vec::new(),
        }
    }

    /// Toggle membership of `key`. Returns whether it is now selected.
    pub fn toggle_sub_agent(&mut self, key: AgentKey) -> DeckResult<bool> {
        self.begin_edit()?;
        if let Some(pos) = self.selected.iter().position(|k| *k == key) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(key);
            Ok(true)
        }
    }

    // ── Validation and build ─────────────────────────────────────────────────

    /// Check every precondition for `build`. Moves to `Ready` on success and
    /// back to `Editing` on failure.
    pub fn validate(&mut self, roster: &dyn AgentRoster) -> DeckResult<()> {
        if self.phase == DraftPhase::Submitted {
            return Err(DeckError::DraftSubmitted);
        }
        self.phase = DraftPhase::Validating;

        match self.check_preconditions(roster) {
            Ok(()) => {
                self.phase = DraftPhase::Ready;
                debug!(kind = %self.kind, name = %self.name, "draft ready");
                Ok(())
            }
            Err(e) => {
                self.phase = DraftPhase::Editing;
                warn!(kind = %self.kind, name = %self.name, error = %e, "draft rejected");
                Err(e)
            }
        }
    }

    fn check_preconditions(&self, roster: &dyn AgentRoster) -> DeckResult<()> {
        if self.name.trim().is_empty() {
            return Err(DeckError::MissingField { field: "name" });
        }
        if self.instructions.trim().is_empty() {
            return Err(DeckError::MissingField {
                field: "instructions",
            });
        }
        if self.kind == AgentKind::LocalAgent && self.description.trim().is_empty() {
            return Err(DeckError::MissingField {
                field: "description",
            });
        }

        if self.kind == AgentKind::LocalAgent && roster.contains_name(&self.name) {
            return Err(DeckError::DuplicateName {
                name: self.name.clone(),
                kind: self.kind,
            });
        }

        // At submit time any config problem is reported as malformed.
        check_against_template(&self.llm_config, default_template(self.llm_type))
            .map_err(|_| DeckError::MalformedConfig)?;

        Ok(())
    }

    /// Validate against `roster` and emit the finished agent record.
    ///
    /// Validation always re-runs, since the roster may have changed since the
    /// draft last reached `Ready`. On success the draft is `Submitted`.
    pub fn build(&mut self, roster: &dyn AgentRoster) -> DeckResult<Agent> {
        self.validate(roster)?;

        let sub_agents: Vec<Agent> = self
            .candidates(roster)
            .into_iter()
            .filter(|a| self.is_selected(&a.key()))
            .collect();

        let agent = Agent {
            name: self.name.clone(),
            url: self.url.clone(),
            sub_agents,
            instructions: self.instructions.clone(),
            framework: String::new(),
            description: self.description.clone(),
            kind: self.kind,
            session_id: self.session_id.clone(),
            usage: 0,
            llm_data: Some(LlmData {
                llm_type: self.llm_type,
                llm_config: parse(&self.llm_config),
            }),
        };

        self.phase = DraftPhase::Submitted;
        info!(
            kind = %agent.kind,
            name = %agent.name,
            sub_agents = agent.sub_agents.len(),
            "agent record built"
        );
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::roster::InMemoryRoster;

    fn roster() -> InMemoryRoster {
        InMemoryRoster::from_json_str(
            r#"[
                { "name": "Agent1", "url": "url1", "type": "mcp" },
                { "name": "Agent2", "url": "url2", "type": "local_agent" },
                { "name": "Agent3", "url": "url3", "type": "mcp" },
                { "name": "Peer", "url": "http://peer", "type": "a2a_agent" }
            ]"#,
        )
        .unwrap()
    }

    fn filled_local(name: &str) -> AgentDraft {
        let mut draft = AgentDraft::local(SessionId::new("test-thread-id"));
        draft.set_name(name).unwrap();
        draft.set_instructions("Submit instructions.").unwrap();
        draft.set_description("Submit description.").unwrap();
        draft.edit_config("API_KEY=submit_key").unwrap();
        draft
    }

    // ── Phase ────────────────────────────────────────────────────────────────

    #[test]
    fn phase_travels_as_lowercase_string() {
        let mut draft = filled_local("Fresh");
        assert_eq!(serde_json::to_value(draft.phase()).unwrap(), "editing");

        draft.validate(&roster()).unwrap();
        assert_eq!(serde_json::to_value(draft.phase()).unwrap(), "ready");

        let parsed: DraftPhase = serde_json::from_str(r#""submitted""#).unwrap();
        assert_eq!(parsed, DraftPhase::Submitted);
    }

    // ── Name filter ──────────────────────────────────────────────────────────

    #[test]
    fn rejected_name_leaves_previous_value() {
        let mut draft = AgentDraft::local(SessionId::new("s"));
        draft.set_name("Agent").unwrap();

        let err = draft.set_name("Agent@Name").unwrap_err();
        assert!(matches!(err, DeckError::NameRejected { character: '@', .. }));
        assert_eq!(draft.name(), "Agent");
    }

    #[test]
    fn every_forbidden_char_keeps_name_and_names_the_kind() {
        let mut draft = AgentDraft::local(SessionId::new("s"));
        draft.set_name("Keep").unwrap();

        for c in crate::name::FORBIDDEN_NAME_CHARS {
            let err = draft.set_name(&format!("a{c}b")).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Local agent name cannot have special characters in name (found '{c}')")
            );
            assert_eq!(draft.name(), "Keep");
        }

        let mut orchestrator = AgentDraft::orchestrator(SessionId::new("s"));
        let err = orchestrator.set_name("my_orchestrator").unwrap_err();
        assert!(matches!(
            err,
            DeckError::NameRejected {
                character: '_',
                kind: AgentKind::Orchestrator
            }
        ));
    }

    #[test]
    fn rejected_name_on_fresh_draft_stays_empty() {
        let mut draft = AgentDraft::orchestrator(SessionId::new("s"));
        assert!(draft.set_name("my_orchestrator").is_err());
        assert_eq!(draft.name(), "");
    }

    // ── LLM type and config ──────────────────────────────────────────────────

    #[test]
    fn new_draft_starts_with_azure_template() {
        let draft = AgentDraft::local(SessionId::new("s"));
        assert_eq!(draft.llm_type(), LlmType::AzureOpenAi);
        assert_eq!(draft.llm_config(), default_template(LlmType::AzureOpenAi));
    }

    #[test]
    fn switching_llm_type_discards_unsaved_edits() {
        let mut draft = AgentDraft::local(SessionId::new("s"));
        draft.edit_config("API_KEY=edited").unwrap();

        draft.select_llm_type(LlmType::OpenAi).unwrap();

        assert_eq!(draft.llm_type(), LlmType::OpenAi);
        assert_eq!(draft.llm_config(), default_template(LlmType::OpenAi));
    }

    #[test]
    fn commit_keeps_edited_values() {
        let mut draft = AgentDraft::local(SessionId::new("s"));
        draft.select_llm_type(LlmType::OpenAi).unwrap();
        draft.edit_config("API_KEY=real_value").unwrap();

        draft.commit_config().unwrap();
        assert_eq!(draft.llm_config(), "API_KEY=real_value");
    }

    #[test]
    fn commit_with_extra_key_reverts_to_template() {
        let mut draft = AgentDraft::local(SessionId::new("s"));
        draft.select_llm_type(LlmType::OpenAi).unwrap();
        draft.edit_config("API_KEY=real_value\nEXTRA=1").unwrap();

        let err = draft.commit_config().unwrap_err();
        assert!(matches!(err, DeckError::KeySetMismatch { .. }));
        assert_eq!(draft.llm_config(), default_template(LlmType::OpenAi));
    }

    #[test]
    fn commit_with_malformed_block_reverts_to_template() {
        let mut draft = AgentDraft::local(SessionId::new("s"));
        draft.edit_config("invalid-config").unwrap();

        let err = draft.commit_config().unwrap_err();
        assert!(matches!(err, DeckError::MalformedConfig));
        assert_eq!(draft.llm_config(), default_template(LlmType::AzureOpenAi));
    }

    // ── Phases ───────────────────────────────────────────────────────────────

    #[test]
    fn validate_reaches_ready_and_edit_drops_back() {
        let roster = roster();
        let mut draft = filled_local("Fresh Agent");

        draft.validate(&roster).unwrap();
        assert_eq!(draft.phase(), DraftPhase::Ready);

        draft.set_description("changed").unwrap();
        assert_eq!(draft.phase(), DraftPhase::Editing);
    }

    #[test]
    fn submitted_draft_refuses_edits() {
        let roster = roster();
        let mut draft = filled_local("Fresh Agent");
        draft.build(&roster).unwrap();

        assert_eq!(draft.phase(), DraftPhase::Submitted);
        assert!(matches!(draft.set_name("Other"), Err(DeckError::DraftSubmitted)));
        assert!(matches!(draft.build(&roster), Err(DeckError::DraftSubmitted)));
    }

    #[test]
    fn missing_description_blocks_local_agent() {
        let roster = roster();
        let mut draft = filled_local("Fresh Agent");
        draft.set_description("   ").unwrap();

        let err = draft.build(&roster).unwrap_err();
        assert!(matches!(err, DeckError::MissingField { field: "description" }));
        assert_eq!(draft.phase(), DraftPhase::Editing);
    }

    #[test]
    fn invalid_config_at_build_is_malformed() {
        let roster = roster();
        let mut draft = filled_local("Submit Agent");
        draft.edit_config("invalid-config").unwrap();

        let err = draft.build(&roster).unwrap_err();
        assert!(matches!(err, DeckError::MalformedConfig));
    }

    #[test]
    fn unknown_key_at_build_is_malformed() {
        let roster = roster();
        let mut draft = filled_local("Submit Agent");
        draft.edit_config("NEW_CONFIG=value").unwrap();

        let err = draft.build(&roster).unwrap_err();
        assert!(matches!(err, DeckError::MalformedConfig));
    }

    // ── Duplicate detection and build ────────────────────────────────────────

    #[test]
    fn duplicate_local_name_then_fresh_name_succeeds() {
        let roster = roster();
        let mut draft = filled_local("Agent2");

        let err = draft.build(&roster).unwrap_err();
        assert!(matches!(
            err,
            DeckError::DuplicateName { ref name, kind: AgentKind::LocalAgent } if name == "Agent2"
        ));

        draft.set_name("Submit Agent").unwrap();
        let agent = draft.build(&roster).unwrap();

        let mut config = BTreeMap::new();
        config.insert("API_KEY".to_string(), "submit_key".to_string());

        assert_eq!(agent.name, "Submit Agent");
        assert_eq!(agent.url, "");
        assert_eq!(agent.kind, AgentKind::LocalAgent);
        assert_eq!(agent.usage, 0);
        assert_eq!(agent.framework, "");
        assert_eq!(agent.session_id, SessionId::new("test-thread-id"));
        assert!(agent.sub_agents.is_empty());
        assert_eq!(
            agent.llm_data,
            Some(LlmData {
                llm_type: LlmType::AzureOpenAi,
                llm_config: config,
            })
        );
    }

    #[test]
    fn local_candidates_are_mcp_entries_only() {
        let roster = roster();
        let draft = AgentDraft::local(SessionId::new("s"));
        let names: Vec<String> = draft.candidates(&roster).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Agent1", "Agent3"]);
    }

    #[test]
    fn selected_mcps_become_sub_agents_in_roster_order() {
        let roster = roster();
        let mut draft = filled_local("Submit Agent");

        assert!(draft.toggle_sub_agent(AgentKey::new("Agent3", "url3")).unwrap());
        assert!(draft.toggle_sub_agent(AgentKey::new("Agent1", "url1")).unwrap());
        // Selecting a non-candidate has no effect on the built record.
        draft.toggle_sub_agent(AgentKey::new("Peer", "http://peer")).unwrap();

        let agent = draft.build(&roster).unwrap();
        let names: Vec<&str> = agent.sub_agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Agent1", "Agent3"]);
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut draft = AgentDraft::local(SessionId::new("s"));
        let key = AgentKey::new("Agent1", "url1");
        assert!(draft.toggle_sub_agent(key.clone()).unwrap());
        assert!(!draft.toggle_sub_agent(key.clone()).unwrap());
        assert!(!draft.is_selected(&key));
    }

    #[test]
    fn orchestrator_build_uses_fixed_url_and_empty_description() {
        let roster = roster();
        let mut draft = AgentDraft::orchestrator(SessionId::new("thread-9"));
        draft.set_name("Planner").unwrap();
        draft.set_instructions("Supervise the peers.").unwrap();
        draft.edit_config("API_KEY=k").unwrap();
        draft.toggle_sub_agent(AgentKey::new("Peer", "http://peer")).unwrap();

        let agent = draft.build(&roster).unwrap();
        assert_eq!(agent.kind, AgentKind::Orchestrator);
        assert_eq!(agent.url, DEFAULT_ORCHESTRATOR_URL);
        assert_eq!(agent.description, "");
        assert_eq!(agent.sub_agents.len(), 1);
        assert_eq!(agent.sub_agents[0].kind, AgentKind::A2aAgent);
    }

    #[test]
    fn orchestrator_does_not_need_description_or_local_uniqueness() {
        let roster = roster();
        let mut draft = AgentDraft::orchestrator(SessionId::new("s"));
        // Same name as a roster local agent; remote check is authoritative.
        draft.set_name("Agent2").unwrap();
        draft.set_instructions("Supervise.").unwrap();
        draft.edit_config("API_KEY=k").unwrap();

        assert!(draft.build(&roster).is_ok());
    }

    #[test]
    fn orchestrator_requires_instructions() {
        let roster = roster();
        let mut draft = AgentDraft::orchestrator(SessionId::new("s"));
        draft.set_name("Planner").unwrap();

        let err = draft.build(&roster).unwrap_err();
        assert!(matches!(err, DeckError::MissingField { field: "instructions" }));
    }
}
