//! OpenAI chat completions client.
//!
//! See: <https://platform.openai.com/docs/api-reference/chat>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use super::traits::CompletionProvider;
use crate::types::{CompletionRequest, CompletionResponse};
use crate::{Result, TetoegenError};

/// Default base URL for the OpenAI API
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Client for the OpenAI chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_http_client(api_key, base_url, Client::new())
    }

    /// Create a client sharing an existing HTTP client.
    ///
    /// The builder uses this to apply a request timeout when one is configured.
    pub fn with_http_client(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        http: Client,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build an HTTP client with an optional request timeout.
    pub fn http_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| TetoegenError::Configuration(format!("failed to build HTTP client: {e}")))
    }

    /// Run a chat completion and return the first choice's text.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}{}", self.base_url, COMPLETIONS_PATH);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| TetoegenError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TetoegenError::Http(e.to_string()))?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                model = %request.model,
                body = %body,
                "OpenAI API error"
            );
            return Err(match status.as_u16() {
                401 => TetoegenError::AuthenticationFailed,
                code => TetoegenError::Api {
                    status: code,
                    message: body,
                },
            });
        }

        let envelope: CompletionResponse = serde_json::from_str(&body)?;
        envelope.first_content().ok_or(TetoegenError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        OpenAiClient::complete(self, request).await
    }
}
