use canonical::{CanonicalError, NormalizeConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning knobs for the phrase matcher.
///
/// Defaults reproduce the reference behaviour: windows of 15 down to 4 words,
/// 20 characters of trailing context, and matches must cover more than 5% of
/// the original document to be kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhraseConfig {
    /// Largest window, in words, tried first. Capped by the original's length.
    #[serde(default = "PhraseConfig::default_max_window")]
    pub max_window: usize,
    /// Smallest window, in words. Documents shorter than this never match.
    #[serde(default = "PhraseConfig::default_min_window")]
    pub min_window: usize,
    /// Characters of raw text appended after a recovered excerpt.
    #[serde(default = "PhraseConfig::default_context_chars")]
    pub context_chars: usize,
    /// A match is recorded only when its similarity is strictly above this.
    #[serde(default = "PhraseConfig::default_min_match_similarity")]
    pub min_match_similarity: f64,
}

impl PhraseConfig {
    pub(crate) fn default_max_window() -> usize {
        15
    }

    pub(crate) fn default_min_window() -> usize {
        4
    }

    pub(crate) fn default_context_chars() -> usize {
        20
    }

    pub(crate) fn default_min_match_similarity() -> f64 {
        5.0
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.min_window == 0 {
            return Err(MatchError::InvalidConfig(
                "min_window must be greater than zero".into(),
            ));
        }
        if self.max_window < self.min_window {
            return Err(MatchError::InvalidConfig(
                "max_window must be >= min_window".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.min_match_similarity) {
            return Err(MatchError::InvalidConfig(
                "min_match_similarity must be between 0.0 and 100.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            max_window: Self::default_max_window(),
            min_window: Self::default_min_window(),
            context_chars: Self::default_context_chars(),
            min_match_similarity: Self::default_min_match_similarity(),
        }
    }
}

/// Parameters of the cross-source aggregate score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreConfig {
    /// The match-count multiplier saturates at this value.
    pub match_count_cap: usize,
    /// Final scale applied after square-root compression.
    pub scale: f64,
    /// Sources whose coverage is not strictly above this are discarded.
    pub source_threshold: f64,
}

impl ScoreConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.match_count_cap == 0 {
            return Err(MatchError::InvalidConfig(
                "match_count_cap must be greater than zero".into(),
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(MatchError::InvalidConfig(
                "scale must be a positive finite number".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.source_threshold) {
            return Err(MatchError::InvalidConfig(
                "source_threshold must be between 0.0 and 100.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            match_count_cap: 5,
            scale: 0.8,
            source_threshold: 10.0,
        }
    }
}

/// Configuration for a whole-document check against many sources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckConfig {
    pub normalize: NormalizeConfig,
    pub phrase: PhraseConfig,
    pub score: ScoreConfig,
    /// Compare sources concurrently on the rayon pool.
    pub use_parallel: bool,
    /// Length, in characters, of the source excerpt attached to each match.
    pub excerpt_chars: usize,
}

impl CheckConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        self.normalize.validate()?;
        self.phrase.validate()?;
        self.score.validate()?;
        if self.excerpt_chars == 0 {
            return Err(MatchError::InvalidConfig(
                "excerpt_chars must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeConfig::default(),
            phrase: PhraseConfig::default(),
            score: ScoreConfig::default(),
            use_parallel: true,
            excerpt_chars: 200,
        }
    }
}

/// Inclusive span of original-document token indices claimed by one match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CoveredRange {
    pub start: usize,
    pub end: usize,
}

impl CoveredRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of tokens covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one token.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn overlaps(&self, other: &CoveredRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// One maximal shared phrase between an original and a source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    /// Share of the original's words covered by this match, in [0, 100].
    pub similarity: f64,
    /// Case-preserved excerpt of the original plus trailing context, or the
    /// normalized phrase when it cannot be located verbatim.
    pub matched_text: String,
    /// Byte offset of the excerpt in the original raw text.
    pub original_index: usize,
    /// Byte offset of the phrase hit in the normalized source text.
    pub source_index: usize,
    /// Original token indices claimed by this match.
    pub range: CoveredRange,
}

/// Result of comparing one original against one source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Comparison {
    /// Share of the original's words covered by any match, in [0, 100].
    pub overall_similarity: f64,
    /// Matches ordered by similarity descending, then by start token.
    pub matches: Vec<Match>,
}

impl Comparison {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A candidate reference document supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateSource {
    /// Identifier shown to users, e.g. an article title.
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Fetched text; `None` when the document failed to materialize.
    #[serde(default)]
    pub text: Option<String>,
}

impl CandidateSource {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            text: Some(text.into()),
        }
    }

    /// A source whose text could not be fetched.
    pub fn unavailable(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            text: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A matcher [`Match`] attributed to the source it was found in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlagiarismMatch {
    pub similarity: f64,
    pub matched_text: String,
    pub original_index: usize,
    pub source_index: usize,
    /// Identifier of the source document.
    pub source: String,
    /// Excerpt of the normalized source text starting at the hit.
    pub source_text: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Final verdict for one document checked against all of its sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlagiarismResult {
    /// Aggregate score in [0, 100].
    pub overall_similarity: f64,
    /// Matches from every retained source, similarity descending.
    pub matches: Vec<PlagiarismMatch>,
}

/// Why a single source produced no comparison.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonFailure {
    #[error("source text unavailable")]
    MissingText,
    #[error("comparison panicked")]
    Panicked,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("normalizer config rejected: {0}")]
    Canonical(#[from] CanonicalError),
}
