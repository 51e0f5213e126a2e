//! Default configuration templates per LLM provider.
//!
//! Each provider maps to exactly one newline-separated `KEY=VALUE` template.
//! The keys are the only ones an operator may fill in; the placeholder values
//! are meant to be overwritten.

use agentdeck_contracts::llm::LlmType;

const AZURE_OPENAI_TEMPLATE: &str = "API_KEY=<your_azure_openai_api_key>
MODEL_NAME=<model_name>
ENDPOINT=<your_azure_openai_endpoint>
API_VERSION=<api_version>
DEPLOYMENT_NAME=<deployment_name>";

const OPENAI_TEMPLATE: &str = "API_KEY=<your-openai-api-key>
MODEL_NAME=<your-openai-model-name>";

const GEMINI_TEMPLATE: &str = "API_KEY=<your-google-api-key>
MODEL_NAME=<your-google-model-name>";

const ANTHROPIC_TEMPLATE: &str = "API_KEY=<your-anthropic-api-key>
MODEL_NAME=<your-anthropic-model-name>";

/// The default configuration block for `llm_type`.
pub fn default_template(llm_type: LlmType) -> &'static str {
    match llm_type {
        LlmType::AzureOpenAi => AZURE_OPENAI_TEMPLATE,
        LlmType::OpenAi => OPENAI_TEMPLATE,
        LlmType::Gemini => GEMINI_TEMPLATE,
        LlmType::Anthropic => ANTHROPIC_TEMPLATE,
    }
}

/// The template's keys, in declaration order.
pub fn template_keys(llm_type: LlmType) -> Vec<&'static str> {
    default_template(llm_type)
        .lines()
        .filter_map(|line| line.split_once('=').map(|(key, _)| key.trim()))
        .collect()
}
