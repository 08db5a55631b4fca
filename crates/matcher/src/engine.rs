use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use canonical::{extend_by_chars, normalize_with, NormalizedText};
use rayon::prelude::*;
use tracing::{info, warn, Level};

use crate::metrics::{CheckMetrics, ComparisonReport};
use crate::phrase::compare_normalized;
use crate::score::{calculate_overall_similarity_with, passes_source_threshold};
use crate::types::{
    CandidateSource, CheckConfig, ComparisonFailure, MatchError, PlagiarismMatch, PlagiarismResult,
};


/// Checks one document against many candidate sources.
///
/// Each `(original, source)` comparison is independent; with
/// [`CheckConfig::use_parallel`] they run concurrently on the rayon pool and are
/// joined in source order before scoring.
pub struct Checker {
    cfg: CheckConfig,
    metrics: Option<Arc<dyn CheckMetrics>>,
}

/// Per-source result before threshold filtering.
struct SourceComparison {
    coverage: f64,
    matches: Vec<PlagiarismMatch>,
}

struct SourceOutcome {
    result: Result<SourceComparison, ComparisonFailure>,
    latency: Duration,
}

impl Checker {
    /// Construct a checker, validating the configuration once up front.
    pub fn new(cfg: CheckConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg, metrics: None })
    }

    /// Attach a metrics observer.
    pub fn with_metrics(mut self, recorder: Arc<dyn CheckMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn config(&self) -> &CheckConfig {
        &self.cfg
    }

    /// Check `original` against every source and aggregate the result.
    ///
    /// Never fails: a source without text, or whose comparison panics,
    /// contributes no matches and leaves its siblings untouched.
    ///
    /// Panics are caught but the process panic hook still runs, so a failing
    /// comparison prints its message to stderr unless the caller installs a
    /// quieter hook.
    pub fn check(&self, original: &str, sources: &[CandidateSource]) -> PlagiarismResult {
        let start = Instant::now();
        let original = normalize_with(original, &self.cfg.normalize);

        let span = tracing::span!(
            Level::INFO,
            "matcher.check",
            original_digest = %original.digest,
            original_tokens = original.len(),
            sources = sources.len()
        );
        let _guard = span.enter();

        let outcomes: Vec<SourceOutcome> = if self.cfg.use_parallel && sources.len() > 1 {
            sources
                .par_iter()
                .map(|source| self.compare_source(&original, source))
                .collect()
        } else {
            sources
                .iter()
                .map(|source| self.compare_source(&original, source))
                .collect()
        };

        let mut ranked: Vec<(usize, PlagiarismMatch)> = Vec::new();
        for (position, (source, outcome)) in sources.iter().zip(outcomes).enumerate() {
            let report = match outcome.result {
                Ok(comparison) => {
                    let retained = passes_source_threshold(comparison.coverage, &self.cfg.score);
                    let report = ComparisonReport {
                        source_id: source.id.clone(),
                        coverage: comparison.coverage,
                        match_count: comparison.matches.len(),
                        retained,
                        failure: None,
                        latency: outcome.latency,
                    };
                    info!(
                        source_id = %source.id,
                        coverage = comparison.coverage,
                        match_count = comparison.matches.len(),
                        retained,
                        elapsed_micros = outcome.latency.as_micros(),
                        "comparison_complete"
                    );
                    if retained {
                        ranked.extend(comparison.matches.into_iter().map(|m| (position, m)));
                    }
                    report
                }
                Err(failure) => {
                    warn!(
                        source_id = %source.id,
                        error = %failure,
                        elapsed_micros = outcome.latency.as_micros(),
                        "comparison_failed"
                    );
                    ComparisonReport {
                        source_id: source.id.clone(),
                        coverage: 0.0,
                        match_count: 0,
                        retained: false,
                        failure: Some(failure),
                        latency: outcome.latency,
                    }
                }
            };
            if let Some(recorder) = self.metrics.as_ref() {
                recorder.record_comparison(&report);
            }
        }

        ranked.sort_by(|(pos_a, a), (pos_b, b)| {
            b.similarity
                .total_cmp(&a.similarity)
                .then(pos_a.cmp(pos_b))
                .then(a.original_index.cmp(&b.original_index))
        });
        let matches: Vec<PlagiarismMatch> = ranked.into_iter().map(|(_, m)| m).collect();
        let overall_similarity = calculate_overall_similarity_with(&matches, &self.cfg.score);

        let latency = start.elapsed();
        info!(
            match_count = matches.len(),
            overall_similarity,
            elapsed_micros = latency.as_micros(),
            "check_complete"
        );
        if let Some(recorder) = self.metrics.as_ref() {
            recorder.record_check(latency, sources.len(), matches.len(), overall_similarity);
        }

        PlagiarismResult {
            overall_similarity,
            matches,
        }
    }

    fn compare_source(&self, original: &NormalizedText, source: &CandidateSource) -> SourceOutcome {
        let start = Instant::now();
        let result = match source.text.as_deref() {
            None => Err(ComparisonFailure::MissingText),
            Some(text) => isolate(|| self.compare_text(original, source, text)),
        };
        SourceOutcome {
            result,
            latency: start.elapsed(),
        }
    }

    fn compare_text(
        &self,
        original: &NormalizedText,
        source: &CandidateSource,
        text: &str,
    ) -> SourceComparison {
        let normalized = normalize_with(text, &self.cfg.normalize);
        let comparison = compare_normalized(original, &normalized, &self.cfg.phrase);

        let matches = comparison
            .matches
            .into_iter()
            .map(|m| {
                let source_text =
                    source_excerpt(&normalized, m.source_index, self.cfg.excerpt_chars);
                PlagiarismMatch {
                    similarity: m.similarity,
                    matched_text: m.matched_text,
                    original_index: m.original_index,
                    source_index: m.source_index,
                    source: source.id.clone(),
                    source_text,
                    source_url: source.url.clone(),
                }
            })
            .collect();

        SourceComparison {
            coverage: comparison.overall_similarity,
            matches,
        }
    }
}

/// Run one comparison, turning a panic into [`ComparisonFailure::Panicked`].
fn isolate<F>(compare: F) -> Result<SourceComparison, ComparisonFailure>
where
    F: FnOnce() -> SourceComparison,
{
    panic::catch_unwind(AssertUnwindSafe(compare)).map_err(|_| ComparisonFailure::Panicked)
}

/// Case-preserved excerpt of the raw source, starting at the token that holds
/// the normalized hit offset.
fn source_excerpt(source: &NormalizedText, source_index: usize, chars: usize) -> String {
    let Some(token) = source
        .token_at_offset(source_index)
        .and_then(|idx| source.tokens.get(idx))
    else {
        return String::new();
    };
    let raw = source.raw_text.as_str();
    let end = extend_by_chars(raw, token.raw_start, chars);
    raw.get(token.raw_start..end).unwrap_or_default().to_string()
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("cfg", &self.cfg)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self {
            cfg: CheckConfig::default(),
            metrics: None,
        }
    }
}

/// Check a document against its sources with the default configuration.
pub fn check_document(original: &str, sources: &[CandidateSource]) -> PlagiarismResult {
    Checker::default().check(original, sources)
}
