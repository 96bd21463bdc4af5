//! Provider trait for chat-completion backends.
//!
//! The gateway talks to upstream models only through [`CompletionProvider`],
//! so tests and alternative backends can stand in for the OpenAI client.
//!
//! # Error semantics
//!
//! Providers report what went wrong and never substitute results:
//! - transport failures and non-2xx answers map to `Http` / `Api` /
//!   `AuthenticationFailed`
//! - a 2xx answer that isn't a usable completion maps to `Json`,
//!   `MalformedResponse` or `EmptyResponse`
//!
//! The gateway decides which fallback each class of error earns.

use async_trait::async_trait;

use crate::Result;
use crate::types::CompletionRequest;

/// Provider for non-streaming chat completions.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Run a completion and return the text content of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
