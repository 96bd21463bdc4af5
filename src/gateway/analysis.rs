//! Photo classification through the upstream vision model.

use std::sync::Arc;
use std::time::Instant;

use tracing::{instrument, warn};

use super::{fallback, parse, record_fallback, record_upstream};
use crate::providers::CompletionProvider;
use crate::request::ClassificationRequest;
use crate::types::AnalysisResult;
use crate::{Result, TetoegenError};

const OPERATION: &str = "analyze";

/// Classifies photos, always answering with a well-formed result.
pub struct AnalysisGateway {
    provider: Option<Arc<dyn CompletionProvider>>,
    model: String,
}

impl AnalysisGateway {
    /// `provider` is `None` when no credential is configured; every call then
    /// takes the unavailable-upstream fallback.
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether an upstream provider is configured.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Classify the photo in `request`.
    ///
    /// Upstream failures never surface: an unreachable or unconfigured
    /// upstream yields [`fallback::unavailable_result`], an unusable payload
    /// yields [`fallback::malformed_result`].
    #[instrument(skip(self, request), fields(operation = OPERATION, model = %self.model))]
    pub async fn analyze(&self, request: &ClassificationRequest) -> AnalysisResult {
        match self.try_analyze(request).await {
            Ok(result) => result,
            Err(e) if e.is_malformed_response() => {
                warn!(error = %e, "unusable classification payload, serving fixed fallback");
                record_fallback(OPERATION, "malformed");
                fallback::malformed_result()
            }
            Err(e) => {
                warn!(error = %e, "classification upstream unavailable, serving random fallback");
                record_fallback(OPERATION, "unavailable");
                fallback::unavailable_result()
            }
        }
    }

    /// Call upstream and decode its answer, surfacing every failure.
    pub async fn try_analyze(&self, request: &ClassificationRequest) -> Result<AnalysisResult> {
        let provider = self.provider.as_ref().ok_or(TetoegenError::NoProvider)?;
        let completion = request.to_completion(&self.model);

        let start = Instant::now();
        let outcome = provider
            .complete(&completion)
            .await
            .and_then(|content| decode_result(&content));
        record_upstream(OPERATION, provider.name(), start, &outcome);
        outcome
    }
}

/// Decode completion text into a validated [`AnalysisResult`].
pub fn decode_result(content: &str) -> Result<AnalysisResult> {
    let result: AnalysisResult = parse::parse_json_content(content)?;
    if !result.has_valid_confidence() {
        return Err(TetoegenError::MalformedResponse(format!(
            "confidence {} out of range",
            result.confidence
        )));
    }
    Ok(result)
}
