//! Telemetry metric name constants.
//!
//! Centralised metric names for tetoegen operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `tetoegen_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint`: HTTP route name ("analyze", "tips", "health")
//! - `provider`: upstream provider name (e.g. "openai")
//! - `operation`: gateway operation ("analyze" or "tips")
//! - `status`: outcome (HTTP routes use the status class; upstream calls
//!   split failures into "malformed" and "error")
//! - `reason`: fallback trigger: "unavailable" or "malformed"

/// Total inbound HTTP requests handled.
///
/// Labels: `endpoint`, `status` ("ok" | "client_error" | "server_error").
pub const REQUESTS_TOTAL: &str = "tetoegen_requests_total";

/// Total upstream model calls.
///
/// Labels: `provider`, `operation`, `status` ("ok" | "malformed" | "error").
/// "malformed" is a 2xx answer with an undecodable payload; "error" covers
/// transport failures, non-2xx statuses and rejected credentials.
pub const UPSTREAM_REQUESTS_TOTAL: &str = "tetoegen_upstream_requests_total";

/// Upstream call duration in seconds.
///
/// Labels: `provider`, `operation`.
pub const UPSTREAM_DURATION_SECONDS: &str = "tetoegen_upstream_duration_seconds";

/// Total synthetic results served instead of model output.
///
/// Labels: `operation`, `reason` ("unavailable" | "malformed").
pub const FALLBACKS_TOTAL: &str = "tetoegen_fallbacks_total";

/// Total tip cache hits.
pub const TIP_CACHE_HITS_TOTAL: &str = "tetoegen_tip_cache_hits_total";

/// Total tip cache misses.
pub const TIP_CACHE_MISSES_TOTAL: &str = "tetoegen_tip_cache_misses_total";
