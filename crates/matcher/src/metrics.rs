// Observability hooks for document checks.
//
// A `CheckMetrics` implementation is injected into a `Checker` with
// `Checker::with_metrics`; the checker reports once per source comparison and
// once per finished check. The phrase matcher and scorer never call it.
use std::time::Duration;

use serde::Serialize;

use crate::types::ComparisonFailure;

/// Outcome of comparing the original against one source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub source_id: String,
    /// Matcher coverage for this source, in [0, 100].
    pub coverage: f64,
    pub match_count: usize,
    /// Whether the source cleared the coverage threshold.
    pub retained: bool,
    pub failure: Option<ComparisonFailure>,
    pub latency: Duration,
}

/// Metrics observer for document checks.
pub trait CheckMetrics: Send + Sync {
    /// Called after each source comparison, in source order.
    fn record_comparison(&self, report: &ComparisonReport);

    /// Called once per check with the wall-clock latency, the number of
    /// sources considered, the number of matches returned and the final score.
    fn record_check(
        &self,
        latency: Duration,
        source_count: usize,
        match_count: usize,
        overall_similarity: f64,
    );
}
