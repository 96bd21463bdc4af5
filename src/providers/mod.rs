//! Upstream model providers.
//!
//! [`CompletionProvider`] is the seam between the gateway and a concrete
//! backend; [`OpenAiClient`] is the production implementation.

pub mod openai;
pub mod traits;

pub use openai::OpenAiClient;
pub use traits::CompletionProvider;
