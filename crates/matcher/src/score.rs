//! Cross-source aggregate scoring.
//!
//! The document-level figure is not a coverage fraction: matches from every
//! retained source are pooled and compressed as
//!
//! ```text
//! min( sqrt( sum(similarity) * min(count, cap) ) * scale, 100 )
//! ```
//!
//! so a handful of strong matches dominates while many weak ones cannot sum
//! past 100. With the defaults `cap = 5` and `scale = 0.8`.

use crate::types::{PlagiarismMatch, ScoreConfig};

/// Clamp a percentage into `[0, 100]`; NaN becomes 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Aggregate score over all matches of one document, default parameters.
pub fn calculate_overall_similarity(matches: &[PlagiarismMatch]) -> f64 {
    calculate_overall_similarity_with(matches, &ScoreConfig::default())
}

/// Aggregate score over all matches of one document.
pub fn calculate_overall_similarity_with(matches: &[PlagiarismMatch], cfg: &ScoreConfig) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }
    let total: f64 = matches.iter().map(|m| clamp_percent(m.similarity)).sum();
    let weight = matches.len().min(cfg.match_count_cap) as f64;
    clamp_percent((total * weight).sqrt() * cfg.scale)
}

/// Whether a source's coverage is high enough for its matches to be kept.
/// The comparison is strict: coverage equal to the threshold is dropped.
pub fn passes_source_threshold(coverage: f64, cfg: &ScoreConfig) -> bool {
    coverage > cfg.source_threshold
}
