//! Development tips through the upstream text model.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument, warn};

use super::{fallback, parse, record_fallback, record_upstream};
use crate::cache::TipCache;
use crate::providers::CompletionProvider;
use crate::request::tip_request;
use crate::types::{DevelopmentTip, PersonalityType};
use crate::{Result, TetoegenError};

const OPERATION: &str = "tips";

/// Produces development tips for a personality type.
pub struct TipGenerator {
    provider: Option<Arc<dyn CompletionProvider>>,
    model: String,
    cache: Option<TipCache>,
}

impl TipGenerator {
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        model: impl Into<String>,
        cache: Option<TipCache>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            cache,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Tips for `label`: cached or model-generated when possible, the static
    /// table entry otherwise.
    #[instrument(skip(self, label), fields(operation = OPERATION, model = %self.model, label = %label))]
    pub async fn generate(&self, label: PersonalityType) -> DevelopmentTip {
        if let Some(ref cache) = self.cache
            && let Some(tip) = cache.get(label).await
        {
            debug!("tip cache hit");
            return tip;
        }

        match self.try_generate(label).await {
            Ok(tip) => {
                if let Some(ref cache) = self.cache {
                    cache.insert(label, tip.clone()).await;
                }
                tip
            }
            Err(e) => {
                let reason = if e.is_malformed_response() {
                    "malformed"
                } else {
                    "unavailable"
                };
                warn!(error = %e, reason, "tip generation failed, serving static tips");
                record_fallback(OPERATION, reason);
                fallback::static_tips(label)
            }
        }
    }

    /// Call upstream and decode its answer, surfacing every failure.
    pub async fn try_generate(&self, label: PersonalityType) -> Result<DevelopmentTip> {
        let provider = self.provider.as_ref().ok_or(TetoegenError::NoProvider)?;
        let request = tip_request(label, &self.model);

        let start = Instant::now();
        let outcome = provider
            .complete(&request)
            .await
            .and_then(|content| parse::parse_json_content(&content));
        record_upstream(OPERATION, provider.name(), start, &outcome);
        outcome
    }
}
