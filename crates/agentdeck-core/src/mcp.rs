//! Drafts for registering remote MCP tool servers.
//!
//! An MCP entry is a leaf record: a name, the server url, and optional HTTP
//! headers the backend should send to it. The headers travel as a JSON object
//! in the record's `instructions` field.

use serde_json::{Map, Value};
use tracing::info;

use agentdeck_contracts::{
    agent::{Agent, AgentKind, SessionId},
    error::{DeckError, DeckResult},
};

use crate::name::check_name;

/// Framework tag stamped on every MCP record.
pub const MCP_FRAMEWORK: &str = "mcp";

/// One editable header row. Rows with an empty key are ignored on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRow {
    pub key: String,
    pub value: String,
}

/// An in-progress MCP entry.
///
/// Unlike `AgentDraft`, an MCP draft is reusable: a successful `submit`
/// returns the record and clears the form for the next entry.
#[derive(Debug, Clone)]
pub struct McpDraft {
    session_id: SessionId,
    name: String,
    url: String,
    headers: Vec<HeaderRow>,
}

impl McpDraft {
    /// A blank draft with a single empty header row.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            name: String::new(),
            url: String::new(),
            headers: vec![HeaderRow::default()],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &[HeaderRow] {
        &self.headers
    }

    /// Same special-character filter as every other agent name.
    pub fn set_name(&mut self, value: &str) -> DeckResult<()> {
        check_name(value, AgentKind::Mcp)?;
        self.name = value.to_string();
        Ok(())
    }

    pub fn set_url(&mut self, value: &str) {
        self.url = value.to_string();
    }

    pub fn add_header_row(&mut self) {
        self.headers.push(HeaderRow::default());
    }

    /// Remove the row at `index`. Returns false when there is no such row.
    pub fn remove_header_row(&mut self, index: usize) -> bool {
        if index < self.headers.len() {
            self.headers.remove(index);
            true
        } else {
            false
        }
    }

    /// Overwrite the row at `index`. Returns false when there is no such row.
    pub fn set_header(&mut self, index: usize, key: &str, value: &str) -> bool {
        match self.headers.get_mut(index) {
            Some(row) => {
                row.key = key.to_string();
                row.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Emit the MCP record and reset the form.
    pub fn submit(&mut self) -> DeckResult<Agent> {
        if self.name.trim().is_empty() {
            return Err(DeckError::MissingField { field: "name" });
        }
        if !is_http_url(self.url.trim()) {
            return Err(DeckError::InvalidUrl {
                url: self.url.clone(),
            });
        }

        let mut headers = Map::new();
        for row in &self.headers {
            let key = row.key.trim();
            if !key.is_empty() {
                headers.insert(key.to_string(), Value::String(row.value.trim().to_string()));
            }
        }

        let agent = Agent {
            name: self.name.clone(),
            url: self.url.trim().to_string(),
            sub_agents: Vec::new(),
            instructions: Value::Object(headers).to_string(),
            framework: MCP_FRAMEWORK.to_string(),
            description: String::new(),
            kind: AgentKind::Mcp,
            session_id: self.session_id.clone(),
            usage: 0,
            llm_data: None,
        };

        info!(name = %agent.name, url = %agent.url, "mcp entry built");
        *self = Self::new(self.session_id.clone());
        Ok(agent)
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"));
    matches!(rest, Some(host) if !host.is_empty()
        && !host.starts_with('/')
        && !host.contains(char::is_whitespace))
}
