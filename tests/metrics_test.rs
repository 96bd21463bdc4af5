//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

use tetoegen::cache::CacheConfig;
use tetoegen::providers::CompletionProvider;
use tetoegen::telemetry;
use tetoegen::types::CompletionRequest;
use tetoegen::{
    ClassificationRequest, ImageUpload, PersonalityType, Result, Tetoegen, TetoegenError,
};

// ============================================================================
// Mock providers
// ============================================================================

struct FixedProvider(&'static str);

#[async_trait]
impl CompletionProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Answers 2xx with no usable completion.
struct EmptyProvider;

#[async_trait]
impl CompletionProvider for EmptyProvider {
    fn name(&self) -> &str {
        "empty"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Err(TetoegenError::EmptyResponse)
    }
}

struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Err(TetoegenError::AuthenticationFailed)
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum counter values matching `name` and every `labels` pair.
fn counter_total(snapshot: &SnapshotVec, name: &str, labels: &[(&str, &str)]) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .filter(|(key, _, _, _)| {
            labels.iter().all(|(k, v)| {
                key.key()
                    .labels()
                    .any(|label| label.key() == *k && label.value() == *v)
            })
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` keeps the sync `with_local_recorder` closure on the
/// current thread while `block_on` drives the inner async work.
fn record<F: Future>(fut: F) -> (F::Output, Snapshotter) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let output = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(fut))
    });
    (output, snapshotter)
}

fn photo() -> ClassificationRequest {
    ClassificationRequest::new(Some(ImageUpload::new(vec![1, 2, 3]))).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_analysis_records_upstream_metrics() {
    let gateway = Tetoegen::builder()
        .provider(Arc::new(FixedProvider(
            r#"{"type":"테토남","emoji":"💪","confidence":88,"reasons":["a"]}"#,
        )))
        .build()
        .unwrap();

    let (_result, snapshotter) = record(gateway.analyze(&photo()));
    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::UPSTREAM_REQUESTS_TOTAL,
            &[("operation", "analyze"), ("status", "ok"), ("provider", "fixed")]
        ),
        1
    );
    assert!(has_histogram(&snapshot, telemetry::UPSTREAM_DURATION_SECONDS));
    assert_eq!(counter_total(&snapshot, telemetry::FALLBACKS_TOTAL, &[]), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_analysis_records_unavailable_fallback() {
    let gateway = Tetoegen::builder()
        .provider(Arc::new(FailingProvider))
        .build()
        .unwrap();

    let (_result, snapshotter) = record(gateway.analyze(&photo()));
    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::UPSTREAM_REQUESTS_TOTAL,
            &[("status", "error")]
        ),
        1
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::FALLBACKS_TOTAL,
            &[("operation", "analyze"), ("reason", "unavailable")]
        ),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn malformed_analysis_records_malformed_fallback() {
    let gateway = Tetoegen::builder()
        .provider(Arc::new(FixedProvider("not json")))
        .build()
        .unwrap();

    let (_result, snapshotter) = record(gateway.analyze(&photo()));
    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::UPSTREAM_REQUESTS_TOTAL,
            &[("operation", "analyze"), ("status", "malformed")]
        ),
        1
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::UPSTREAM_REQUESTS_TOTAL,
            &[("status", "error")]
        ),
        0
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::FALLBACKS_TOTAL,
            &[("operation", "analyze"), ("reason", "malformed")]
        ),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn empty_completion_is_malformed_not_error() {
    let gateway = Tetoegen::builder()
        .provider(Arc::new(EmptyProvider))
        .build()
        .unwrap();

    let (_result, snapshotter) = record(gateway.analyze(&photo()));
    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::UPSTREAM_REQUESTS_TOTAL,
            &[("provider", "empty"), ("status", "malformed")]
        ),
        1
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::UPSTREAM_REQUESTS_TOTAL,
            &[("status", "error")]
        ),
        0
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::FALLBACKS_TOTAL,
            &[("operation", "analyze"), ("reason", "malformed")]
        ),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn malformed_tips_record_malformed_upstream_status() {
    let gateway = Tetoegen::builder()
        .provider(Arc::new(FixedProvider("팁 목록입니다")))
        .build()
        .unwrap();

    let (_tips, snapshotter) = record(gateway.development_tips(PersonalityType::TetoMale));
    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::UPSTREAM_REQUESTS_TOTAL,
            &[("operation", "tips"), ("status", "malformed")]
        ),
        1
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::FALLBACKS_TOTAL,
            &[("operation", "tips"), ("reason", "malformed")]
        ),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn no_provider_records_fallback_without_upstream_call() {
    let gateway = Tetoegen::builder().build().unwrap();

    let (_tips, snapshotter) = record(gateway.development_tips(PersonalityType::EgenMale));
    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(&snapshot, telemetry::UPSTREAM_REQUESTS_TOTAL, &[]),
        0
    );
    assert_eq!(
        counter_total(
            &snapshot,
            telemetry::FALLBACKS_TOTAL,
            &[("operation", "tips"), ("reason", "unavailable")]
        ),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn tip_cache_records_hits_and_misses() {
    let gateway = Tetoegen::builder()
        .provider(Arc::new(FixedProvider(
            r#"{"title":"t","tips":["a"],"shoppingKeywords":[]}"#,
        )))
        .tip_cache(CacheConfig::new())
        .build()
        .unwrap();

    let (_, snapshotter) = record(async {
        gateway.development_tips(PersonalityType::TetoFemale).await;
        gateway.development_tips(PersonalityType::TetoFemale).await;
    });
    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_total(&snapshot, telemetry::TIP_CACHE_MISSES_TOTAL, &[]),
        1
    );
    assert_eq!(
        counter_total(&snapshot, telemetry::TIP_CACHE_HITS_TOTAL, &[]),
        1
    );
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let gateway = Tetoegen::builder()
        .provider(Arc::new(FailingProvider))
        .build()
        .unwrap();
    let _result = gateway.analyze(&photo()).await;
}
