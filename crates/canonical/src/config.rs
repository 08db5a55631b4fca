//! Configuration types for the normalizer.
//!
//! [`NormalizeConfig`] controls the few knobs the normalizer exposes. Lowercasing,
//! punctuation stripping and whitespace collapsing are always on: phrase matching
//! only works when both sides of a comparison are reduced the same way.
//!
//! # Versioning
//!
//! The `version` field is folded into every [`NormalizedText::digest`]. Any change
//! to normalization behavior must come with a version bump so digests produced by
//! different rules never collide.
//!
//! ```rust
//! use canonical::NormalizeConfig;
//!
//! let config = NormalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(config.validate().is_ok());
//! ```
//!
//! [`NormalizedText::digest`]: crate::NormalizedText::digest

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the normalizer.
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configuration files.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Version of the normalization rules.
    ///
    /// Must be >= 1. Version 0 is reserved and rejected by [`NormalizeConfig::validate`].
    /// The version is included in the identity digest:
    ///
    /// ```text
    /// SHA-256(version.to_be_bytes() || 0x00 || normalized_text_bytes)
    /// ```
    pub version: u32,

    /// If true, apply Unicode NFKC normalization to each grapheme cluster before
    /// lowercasing.
    ///
    /// This merges composed and decomposed forms ("é" U+00E9 versus "e" followed by
    /// U+0301), so that an accented letter survives punctuation stripping
    /// instead of losing its combining mark, and folds compatibility characters such
    /// as the "ﬁ" ligature into plain letters.
    ///
    /// Default: `true`.
    pub normalize_unicode: bool,
}

impl NormalizeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
        }
    }
}
