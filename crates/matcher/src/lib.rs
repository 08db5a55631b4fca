//! # Plagscan Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` estimates how much of a submitted document overlaps with candidate
//! reference documents. It sits on top of the normalizer (`canonical`) and
//! provides three layers:
//!
//! - [`phrase`]: the pairwise phrase matcher. Finds maximal, non-overlapping
//!   shared word runs between an original and one source, longest windows
//!   first, and reports per-match similarity plus the source's coverage.
//! - [`score`]: the aggregate scorer that folds matches from every source
//!   into one document-level figure.
//! - [`Checker`]: per-document orchestration. Compares the original against
//!   every source (concurrently by default), drops low-coverage sources,
//!   attributes matches to their source and scores the result.
//!
//! The phrase matcher and scorer are pure functions; only the [`Checker`]
//! logs or reports metrics.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{CandidateSource, Checker, CheckConfig};
//!
//! let checker = Checker::new(CheckConfig::default()).expect("valid config");
//! let original = "Rust gives you memory safety without garbage collection, \
//!                 which is why it is popular for systems work.";
//! let sources = vec![
//!     CandidateSource::new(
//!         "Rust (programming language)",
//!         "Rust gives you memory safety without garbage collection.",
//!     )
//!     .with_url("https://en.wikipedia.org/wiki/Rust_(programming_language)"),
//!     CandidateSource::unavailable("Fetch failed"),
//! ];
//!
//! let result = checker.check(original, &sources);
//! assert!(result.overall_similarity > 0.0);
//! assert_eq!(result.matches[0].source, "Rust (programming language)");
//! ```
//!
//! ## Observability
//!
//! Inject a [`CheckMetrics`] implementation with [`Checker::with_metrics`] to
//! receive one [`ComparisonReport`] per source and one summary per check. The
//! checker also emits `tracing` events (`comparison_complete`,
//! `comparison_failed`, `check_complete`).

pub mod engine;
pub mod metrics;
pub mod phrase;
pub mod score;
pub mod types;

pub use crate::engine::{check_document, Checker};
pub use crate::metrics::{CheckMetrics, ComparisonReport};
pub use crate::phrase::{compare_normalized, find_all_similarities, find_all_similarities_with};
pub use crate::score::{
    calculate_overall_similarity, calculate_overall_similarity_with, clamp_percent,
    passes_source_threshold,
};
pub use crate::types::{
    CandidateSource, CheckConfig, Comparison, ComparisonFailure, CoveredRange, Match, MatchError,
    PhraseConfig, PlagiarismMatch, PlagiarismResult, ScoreConfig,
};
