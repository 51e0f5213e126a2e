//! HTTP implementation of the provisioning backend.
//!
//! Both endpoints take and return JSON over `POST`. Every call is a single
//! request; transport failures, non-success statuses, and undecodable bodies
//! all surface as `DeckError::RemoteCallFailed` naming the endpoint. The one
//! exception is `409 Conflict` from the create endpoint, which the backend
//! uses to report that the orchestrator name was taken after all.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use agentdeck_config::BackendConfig;
use agentdeck_contracts::{
    agent::Agent,
    error::{DeckError, DeckResult},
    outcome::{CreateResponse, NameCheckRequest, NameCheckResponse},
};
use agentdeck_core::ProvisioningBackend;

pub const CHECK_NAME_PATH: &str = "/check-orchestrator-name";
pub const CREATE_PATH: &str = "/create-multi-agent";

/// A provisioning backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Base URL without a trailing slash (e.g. "http://localhost:8000").
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns `DeckError::ConfigError` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> DeckResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeckError::ConfigError {
                reason: format!("failed to create HTTP client: {}", e),
            })?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &BackendConfig) -> DeckResult<Self> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `path` and return the raw response.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &'static str,
        body: &B,
    ) -> DeckResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "sending provisioning request");

        self.client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, url = %url, "provisioning request failed");
                DeckError::RemoteCallFailed {
                    endpoint: path.to_string(),
                    reason: e.to_string(),
                }
            })
    }

    /// Decode a successful response body, or turn a failure status into
    /// `RemoteCallFailed`.
    async fn decode<T: DeserializeOwned>(
        path: &'static str,
        response: reqwest::Response,
    ) -> DeckResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, endpoint = path, body = %body, "backend returned error status");
            return Err(DeckError::RemoteCallFailed {
                endpoint: path.to_string(),
                reason: format!("unexpected status {}", status),
            });
        }

        response.json::<T>().await.map_err(|e| {
            error!(error = %e, endpoint = path, "failed to decode backend response");
            DeckError::RemoteCallFailed {
                endpoint: path.to_string(),
                reason: format!("invalid response body: {}", e),
            }
        })
    }
}

#[async_trait]
impl ProvisioningBackend for HttpBackend {
    async fn check_orchestrator_name(&self, name: &str) -> DeckResult<bool> {
        let request = NameCheckRequest {
            name: name.to_string(),
        };
        let response = self.post(CHECK_NAME_PATH, &request).await?;
        let decoded: NameCheckResponse = Self::decode(CHECK_NAME_PATH, response).await?;
        debug!(name = %name, is_unique = decoded.is_unique, "name check answered");
        Ok(decoded.is_unique)
    }

    async fn create_multi_agent(&self, agent: &Agent) -> DeckResult<Option<Value>> {
        let response = self.post(CREATE_PATH, agent).await?;
        if response.status() == StatusCode::CONFLICT {
            error!(name = %agent.name, "backend rejected create: name taken");
            return Err(DeckError::DuplicateOrchestratorName {
                name: agent.name.clone(),
            });
        }
        let decoded: CreateResponse = Self::decode(CREATE_PATH, response).await?;
        Ok(decoded.agent_urls)
    }
}
