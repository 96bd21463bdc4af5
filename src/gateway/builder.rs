//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::{AnalysisGateway, Gateway, TipGenerator};
use crate::Result;
use crate::cache::{CacheConfig, TipCache};
use crate::providers::{CompletionProvider, OpenAiClient, openai};
use crate::request::{DEFAULT_ANALYZE_MODEL, DEFAULT_TIPS_MODEL};

/// Main entry point for creating gateway instances.
pub struct Tetoegen;

impl Tetoegen {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> TetoegenBuilder {
        TetoegenBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// A gateway without a provider is valid: it serves fallbacks only.
pub struct TetoegenBuilder {
    openai_key: Option<String>,
    base_url: String,
    analyze_model: String,
    tips_model: String,
    timeout: Option<Duration>,
    tip_cache: Option<CacheConfig>,
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl Default for TetoegenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TetoegenBuilder {
    pub fn new() -> Self {
        Self {
            openai_key: None,
            base_url: openai::DEFAULT_BASE_URL.to_string(),
            analyze_model: DEFAULT_ANALYZE_MODEL.to_string(),
            tips_model: DEFAULT_TIPS_MODEL.to_string(),
            timeout: None,
            tip_cache: None,
            provider: None,
        }
    }

    /// Configure the OpenAI provider. Blank keys are ignored.
    pub fn openai(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.openai_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Override the OpenAI base URL (proxies, wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Vision model used for classification.
    pub fn analyze_model(mut self, model: impl Into<String>) -> Self {
        self.analyze_model = model.into();
        self
    }

    /// Text model used for development tips.
    pub fn tips_model(mut self, model: impl Into<String>) -> Self {
        self.tips_model = model.into();
        self
    }

    /// Per-request upstream timeout. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable the tip cache.
    pub fn tip_cache(mut self, config: CacheConfig) -> Self {
        self.tip_cache = Some(config);
        self
    }

    /// Use a custom provider instead of the OpenAI client.
    ///
    /// Takes precedence over [`openai`](Self::openai).
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Build the gateway.
    ///
    /// Fails only if the HTTP client can't be constructed.
    pub fn build(self) -> Result<Gateway> {
        let provider = match (self.provider, self.openai_key) {
            (Some(provider), _) => Some(provider),
            (None, Some(key)) => {
                let http = OpenAiClient::http_client(self.timeout)?;
                let client = OpenAiClient::with_http_client(key, self.base_url, http);
                Some(Arc::new(client) as Arc<dyn CompletionProvider>)
            }
            (None, None) => None,
        };

        let cache = self.tip_cache.as_ref().map(TipCache::new);

        Ok(Gateway::new(
            AnalysisGateway::new(provider.clone(), self.analyze_model),
            TipGenerator::new(provider, self.tips_model, cache),
        ))
    }
}
