//! [`ServiceClient`]: HTTP client for a running tetoegend.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::types::{
    AnalysisResult, DevelopmentTip, HealthResponse, ImageUpload, PersonalityType,
};
use crate::{Result, TetoegenError};

/// Client for the tetoegend HTTP API.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ServiceClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = ServiceClient::new("http://127.0.0.1:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| TetoegenError::Http(e.to_string()))?;
        decode(response).await
    }

    /// `POST /api/analyze` with `image` as the `image` multipart field.
    pub async fn analyze(&self, image: &ImageUpload) -> Result<AnalysisResult> {
        let mut part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone().unwrap_or_else(|| "image".to_string()));
        if let Some(ref content_type) = image.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| TetoegenError::InvalidInput(format!("bad content type: {e}")))?;
        }
        let form = Form::new().part("image", part);

        let response = self
            .http
            .post(format!("{}/api/analyze", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TetoegenError::Http(e.to_string()))?;
        decode(response).await
    }

    /// `POST /api/tips` for `label`.
    pub async fn tips(&self, label: PersonalityType) -> Result<DevelopmentTip> {
        let response = self
            .http
            .post(format!("{}/api/tips", self.base_url))
            .json(&serde_json::json!({ "type": label }))
            .send()
            .await
            .map_err(|e| TetoegenError::Http(e.to_string()))?;
        decode(response).await
    }
}

/// Decode a success body, or turn the server's `{error}` payload into `Api`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TetoegenError::Http(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        return Err(TetoegenError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
