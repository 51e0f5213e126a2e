//! Supported language-model provider types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Closed set of model providers an agent can be configured against.
///
/// Serialized with the same display strings the operator picks from
/// (e.g. `"Azure OpenAI"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmType {
    #[default]
    #[serde(rename = "Azure OpenAI")]
    AzureOpenAi,
    #[serde(rename = "OpenAI")]
    OpenAi,
    #[serde(rename = "Gemini")]
    Gemini,
    #[serde(rename = "Anthropic")]
    Anthropic,
}

impl LlmType {
    /// All providers, in menu order. The first entry is the default selection.
    pub const ALL: [LlmType; 4] = [
        LlmType::AzureOpenAi,
        LlmType::OpenAi,
        LlmType::Gemini,
        LlmType::Anthropic,
    ];

    /// Display name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            LlmType::AzureOpenAi => "Azure OpenAI",
            LlmType::OpenAi => "OpenAI",
            LlmType::Gemini => "Gemini",
            LlmType::Anthropic => "Anthropic",
        }
    }

    /// Command-line friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            LlmType::AzureOpenAi => "azure-openai",
            LlmType::OpenAi => "openai",
            LlmType::Gemini => "gemini",
            LlmType::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for LlmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmType {
    type Err = DeckError;

    /// Accepts either the display name (case-insensitive) or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LlmType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted) || t.slug() == wanted)
            .ok_or_else(|| DeckError::UnknownLlmType {
                value: wanted.to_string(),
            })
    }
}
