//! YAML configuration file support for plagscan.
//!
//! Every tunable of the normalizer, the phrase matcher and the aggregate scorer
//! can be set from a single YAML file. Omitted fields fall back to the defaults,
//! which reproduce the reference behaviour.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "wikipedia essays"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!
//! matcher:
//!   max_window: 15
//!   min_window: 4
//!   context_chars: 20
//!   min_match_similarity: 5.0
//!   use_parallel: true
//!   excerpt_chars: 200
//!
//! scoring:
//!   match_count_cap: 5
//!   scale: 0.8
//!   source_threshold: 10.0
//! ```

use std::fs;
use std::path::Path;

use canonical::NormalizeConfig;
use matcher::{CheckConfig, PhraseConfig, ScoreConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlagscanConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub matcher: MatcherYamlConfig,

    #[serde(default)]
    pub scoring: ScoringYamlConfig,
}

impl PlagscanConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PlagscanConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical.validate()?;
        self.matcher.validate()?;
        self.scoring.validate()?;

        // Cross-field invariants live on the runtime config.
        self.to_check_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))
    }

    pub fn to_normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            version: self.canonical.version,
            normalize_unicode: self.canonical.normalize_unicode,
        }
    }

    /// Build the runtime configuration for a [`matcher::Checker`].
    pub fn to_check_config(&self) -> CheckConfig {
        CheckConfig {
            normalize: self.to_normalize_config(),
            phrase: PhraseConfig {
                max_window: self.matcher.max_window,
                min_window: self.matcher.min_window,
                context_chars: self.matcher.context_chars,
                min_match_similarity: self.matcher.min_match_similarity,
            },
            score: ScoreConfig {
                match_count_cap: self.scoring.match_count_cap,
                scale: self.scoring.scale,
                source_threshold: self.scoring.source_threshold,
            },
            use_parallel: self.matcher.use_parallel,
            excerpt_chars: self.matcher.excerpt_chars,
        }
    }
}

impl Default for PlagscanConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalYamlConfig::default(),
            matcher: MatcherYamlConfig::default(),
            scoring: ScoringYamlConfig::default(),
        }
    }
}

/// Normalizer YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub normalize_unicode: bool,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
        }
    }
}

/// Phrase matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherYamlConfig {
    #[serde(default = "default_max_window")]
    pub max_window: usize,

    #[serde(default = "default_min_window")]
    pub min_window: usize,

    #[serde(default = "default_context_chars")]
    pub context_chars: usize,

    #[serde(default = "default_min_match_similarity")]
    pub min_match_similarity: f64,

    #[serde(default = "true_value")]
    pub use_parallel: bool,

    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,
}

impl MatcherYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.min_window == 0 {
            return Err(ConfigLoadError::Validation(
                "matcher.min_window must be >= 1".to_string(),
            ));
        }
        if self.max_window < self.min_window {
            return Err(ConfigLoadError::Validation(
                "matcher.max_window must be >= matcher.min_window".to_string(),
            ));
        }
        if self.excerpt_chars == 0 {
            return Err(ConfigLoadError::Validation(
                "matcher.excerpt_chars must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MatcherYamlConfig {
    fn default() -> Self {
        Self {
            max_window: 15,
            min_window: 4,
            context_chars: 20,
            min_match_similarity: 5.0,
            use_parallel: true,
            excerpt_chars: 200,
        }
    }
}

/// Aggregate scoring YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringYamlConfig {
    #[serde(default = "default_match_count_cap")]
    pub match_count_cap: usize,

    #[serde(default = "default_scale")]
    pub scale: f64,

    #[serde(default = "default_source_threshold")]
    pub source_threshold: f64,
}

impl ScoringYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.match_count_cap == 0 {
            return Err(ConfigLoadError::Validation(
                "scoring.match_count_cap must be >= 1".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.source_threshold) {
            return Err(ConfigLoadError::Validation(
                "scoring.source_threshold must be between 0 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScoringYamlConfig {
    fn default() -> Self {
        Self {
            match_count_cap: 5,
            scale: 0.8,
            source_threshold: 10.0,
        }
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_max_window() -> usize {
    15
}
fn default_min_window() -> usize {
    4
}
fn default_context_chars() -> usize {
    20
}
fn default_min_match_similarity() -> f64 {
    5.0
}
fn default_excerpt_chars() -> usize {
    200
}
fn default_match_count_cap() -> usize {
    5
}
fn default_scale() -> f64 {
    0.8
}
fn default_source_threshold() -> f64 {
    10.0
}
