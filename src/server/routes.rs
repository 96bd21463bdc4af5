//! HTTP routes.
//!
//! - `POST /api/analyze`: multipart upload with an `image` field
//! - `POST /api/tips`: JSON `{"type": "<label>"}`
//! - `GET /health`: liveness and version
//!
//! Neither API route requires authentication.

use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::error::{
    ANALYZE_FAILED, ApiError, IMAGE_REQUIRED, IMAGE_TOO_LARGE, INVALID_REQUEST, TIPS_FAILED,
    TYPE_REQUIRED, TYPE_UNKNOWN,
};
use crate::gateway::Gateway;
use crate::request::ClassificationRequest;
use crate::telemetry;
use crate::types::{
    AnalysisResult, DevelopmentTip, HealthResponse, ImageUpload, PersonalityType,
};

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Gateway>,
}

/// Build the service router.
///
/// `max_upload_bytes` caps every request body; larger uploads are answered
/// with 413.
pub fn router(gateway: Arc<Gateway>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/tips", post(tips))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(AppState { gateway })
}

/// Body of `POST /api/tips`.
#[derive(Debug, Deserialize)]
pub struct TipsRequest {
    #[serde(rename = "type", default)]
    pub label: Option<String>,
}

async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    respond("analyze", analyze_upload(state, multipart).await)
}

async fn analyze_upload(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<AnalysisResult, ApiError> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(INVALID_REQUEST, e.body_text()))?;
    let image = read_image(multipart).await?;
    let request =
        ClassificationRequest::new(image).map_err(|_| ApiError::MissingInput(IMAGE_REQUIRED))?;

    // Detached from the request future: a client hanging up doesn't cancel
    // the upstream call, and a panic comes back as a JoinError.
    let gateway = Arc::clone(&state.gateway);
    tokio::spawn(async move { gateway.analyze(&request).await })
        .await
        .map_err(|e| ApiError::internal(ANALYZE_FAILED, e.to_string()))
}

/// Read the `image` field, skipping any others.
async fn read_image(mut multipart: Multipart) -> Result<Option<ImageUpload>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let mut upload = ImageUpload::new(bytes.to_vec());
        if let Some(content_type) = content_type {
            upload = upload.content_type(content_type);
        }
        if let Some(file_name) = file_name {
            upload = upload.file_name(file_name);
        }
        return Ok(Some(upload));
    }
    Ok(None)
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(IMAGE_TOO_LARGE)
    } else {
        ApiError::bad_request(INVALID_REQUEST, e.body_text())
    }
}

async fn tips(
    State(state): State<AppState>,
    payload: Result<Json<TipsRequest>, JsonRejection>,
) -> Response {
    respond("tips", tips_for(state, payload).await)
}

async fn tips_for(
    state: AppState,
    payload: Result<Json<TipsRequest>, JsonRejection>,
) -> Result<DevelopmentTip, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::bad_request(INVALID_REQUEST, e.body_text()))?;
    let label = payload
        .label
        .filter(|label| !label.trim().is_empty())
        .ok_or(ApiError::MissingInput(TYPE_REQUIRED))?;
    let label: PersonalityType = label
        .parse()
        .map_err(|e: crate::TetoegenError| ApiError::bad_request(TYPE_UNKNOWN, e.to_string()))?;

    let gateway = Arc::clone(&state.gateway);
    tokio::spawn(async move { gateway.development_tips(label).await })
        .await
        .map_err(|e| ApiError::internal(TIPS_FAILED, e.to_string()))
}

async fn health(State(state): State<AppState>) -> Response {
    let upstream = if state.gateway.has_provider() {
        "configured"
    } else {
        "fallback"
    };
    respond(
        "health",
        Ok(HealthResponse {
            status: "ok".to_string(),
            version: crate::PKG_VERSION.to_string(),
            upstream: upstream.to_string(),
        }),
    )
}

/// Serialize the outcome and count it.
fn respond<T: Serialize>(endpoint: &'static str, outcome: Result<T, ApiError>) -> Response {
    let response = match outcome {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response(),
    };
    record_request(endpoint, response.status());
    response
}

fn record_request(endpoint: &'static str, status: StatusCode) {
    let class = if status.is_success() {
        "ok"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "server_error"
    };
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "endpoint" => endpoint,
        "status" => class,
    )
    .increment(1);
}
