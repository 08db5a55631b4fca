//! Workspace umbrella crate for plagscan.
//!
//! Stitches the normalizer (`canonical`) and the matcher (`matcher`) together
//! behind one API, and adds YAML configuration loading so a deployment can
//! tune windows, thresholds and scoring without recompiling.
//!
//! ```
//! use plagscan::{check_with_config, CandidateSource, PlagscanConfig};
//!
//! let config = PlagscanConfig::default();
//! let sources = [CandidateSource::new(
//!     "Photosynthesis",
//!     "Photosynthesis is a process used by plants to convert light energy into chemical energy.",
//! )];
//! let result = check_with_config(
//!     "In short, photosynthesis is a process used by plants to convert light energy.",
//!     &sources,
//!     &config,
//! )
//! .expect("default config is valid");
//! assert!(result.overall_similarity > 0.0);
//! ```

pub mod config;

pub use canonical::{
    collapse_whitespace, hash_text, normalize, normalize_with, CanonicalError, NormalizeConfig,
    NormalizedText, Token,
};
pub use matcher::{
    calculate_overall_similarity, check_document, find_all_similarities, CandidateSource,
    CheckConfig, CheckMetrics, Checker, Comparison, ComparisonReport, CoveredRange, Match,
    MatchError, PhraseConfig, PlagiarismMatch, PlagiarismResult, ScoreConfig,
};

pub use crate::config::{ConfigLoadError, PlagscanConfig};

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while setting up a check.
///
/// The check itself is total; only configuration can fail.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration load failure: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("matcher setup failure: {0}")]
    Match(#[from] MatchError),
}

/// Build a [`Checker`] from a loaded configuration.
pub fn checker_from_config(config: &PlagscanConfig) -> Result<Checker, PipelineError> {
    Ok(Checker::new(config.to_check_config())?)
}

/// Load a YAML configuration file and build a [`Checker`] from it.
pub fn load_checker<P: AsRef<Path>>(path: P) -> Result<Checker, PipelineError> {
    let config = PlagscanConfig::from_file(path)?;
    checker_from_config(&config)
}

/// Check one document against its sources under an explicit configuration.
pub fn check_with_config(
    original: &str,
    sources: &[CandidateSource],
    config: &PlagscanConfig,
) -> Result<PlagiarismResult, PipelineError> {
    let checker = checker_from_config(config)?;
    Ok(checker.check(original, sources))
}
