//! HTTP error responses.
//!
//! Every error leaves the service as `{"error": "<message>"}`. Messages are
//! the user-facing Korean strings; internal details only go to the log.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{debug, error};

pub const IMAGE_REQUIRED: &str = "이미지가 필요합니다.";
pub const TYPE_REQUIRED: &str = "성격 유형이 필요합니다.";
pub const TYPE_UNKNOWN: &str = "알 수 없는 성격 유형입니다.";
pub const IMAGE_TOO_LARGE: &str = "이미지 용량이 너무 큽니다.";
pub const INVALID_REQUEST: &str = "잘못된 요청입니다.";
pub const ANALYZE_FAILED: &str = "분석 중 오류가 발생했습니다.";
pub const TIPS_FAILED: &str = "팁 생성 중 오류가 발생했습니다.";

/// An error answered to the HTTP caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required field was absent.
    #[error("{0}")]
    MissingInput(&'static str),

    /// The request was present but unusable.
    #[error("{message}")]
    BadRequest {
        message: &'static str,
        detail: String,
    },

    #[error("{0}")]
    PayloadTooLarge(&'static str),

    /// Unexpected failure inside the service.
    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn bad_request(message: &'static str, detail: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message,
            detail: detail.into(),
        }
    }

    pub fn internal(message: &'static str, detail: impl Into<String>) -> Self {
        ApiError::Internal {
            message,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingInput(_) | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal { ref detail, .. } => error!(detail = %detail, "request failed"),
            ApiError::BadRequest { ref detail, .. } => debug!(detail = %detail, "bad request"),
            _ => {}
        }
        let status = self.status();
        let message = self.to_string();
        (status, Json(ErrorBody { error: &message })).into_response()
    }
}
