//! Tetoegen error types

/// Tetoegen error types
#[derive(Debug, thiserror::Error)]
pub enum TetoegenError {
    // Inbound request errors
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    // Configuration errors
    #[error("no model provider configured")]
    NoProvider,

    #[error("configuration error: {0}")]
    Configuration(String),

    // Upstream payload errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("empty response from model")]
    EmptyResponse,
}

impl TetoegenError {
    /// Whether this error means the upstream answered but its payload was unusable.
    ///
    /// Malformed responses resolve to the fixed fallback result; every other
    /// upstream error (transport, non-2xx, missing credential) resolves to the
    /// randomized one.
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            TetoegenError::Json(_) | TetoegenError::MalformedResponse(_) | TetoegenError::EmptyResponse
        )
    }

    /// Whether this error was caused by the inbound request rather than upstream.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TetoegenError::MissingInput(_) | TetoegenError::InvalidInput(_)
        )
    }
}

/// Result type alias for Tetoegen operations
pub type Result<T> = std::result::Result<T, TetoegenError>;
