//! Gateway over the upstream model.
//!
//! [`Gateway`] bundles the two operations the HTTP surface exposes:
//! photo classification ([`AnalysisGateway`]) and development tips
//! ([`TipGenerator`]). Both are infallible from the caller's point of view:
//! every upstream failure is logged, counted and replaced by a fallback.

mod analysis;
mod builder;
pub mod fallback;
mod parse;
mod tips;

use std::time::Instant;

pub use analysis::{AnalysisGateway, decode_result};
pub use builder::{Tetoegen, TetoegenBuilder};
pub use tips::TipGenerator;

use crate::request::ClassificationRequest;
use crate::{Result, telemetry};
use crate::types::{AnalysisResult, DevelopmentTip, PersonalityType};

/// Classification and tip generation behind one handle.
pub struct Gateway {
    analysis: AnalysisGateway,
    tips: TipGenerator,
}

impl Gateway {
    pub fn new(analysis: AnalysisGateway, tips: TipGenerator) -> Self {
        Self { analysis, tips }
    }

    /// Classify a photo. See [`AnalysisGateway::analyze`].
    pub async fn analyze(&self, request: &ClassificationRequest) -> AnalysisResult {
        self.analysis.analyze(request).await
    }

    /// Development tips for a label. See [`TipGenerator::generate`].
    pub async fn development_tips(&self, label: PersonalityType) -> DevelopmentTip {
        self.tips.generate(label).await
    }

    /// Whether calls can reach an upstream model at all.
    pub fn has_provider(&self) -> bool {
        self.analysis.has_provider()
    }

    pub fn analysis(&self) -> &AnalysisGateway {
        &self.analysis
    }

    pub fn tips(&self) -> &TipGenerator {
        &self.tips
    }
}

/// Record upstream call outcome metrics (counter + histogram).
///
/// A 2xx answer whose payload can't be decoded counts as "malformed",
/// distinct from transport and status failures ("error").
fn record_upstream<T>(
    operation: &'static str,
    provider: &str,
    start: Instant,
    outcome: &Result<T>,
) {
    let status = match outcome {
        Ok(_) => "ok",
        Err(e) if e.is_malformed_response() => "malformed",
        Err(_) => "error",
    };
    metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
        "provider" => provider.to_owned(),
        "operation" => operation,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::UPSTREAM_DURATION_SECONDS,
        "provider" => provider.to_owned(),
        "operation" => operation,
    )
    .record(start.elapsed().as_secs_f64());
}

fn record_fallback(operation: &'static str, reason: &'static str) {
    metrics::counter!(telemetry::FALLBACKS_TOTAL,
        "operation" => operation,
        "reason" => reason,
    )
    .increment(1);
}
