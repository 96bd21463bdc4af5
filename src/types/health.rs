//! Service health payload

use serde::{Deserialize, Serialize};

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `"configured"` when an upstream key is set, `"fallback"` otherwise.
    pub upstream: String,
}
