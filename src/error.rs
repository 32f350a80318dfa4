//! Error types for configuration and signal-based matching.
//!
//! Empty slides and mismatched element kinds are not errors: they score 0.0.
//! Only invalid configuration and unusable external signals are reported.

use thiserror::Error;

/// Invalid weights or thresholds, detected before any comparison runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("layout_weight ({layout}) and text_weight ({text}) must sum to 1.0, got {sum}")]
    WeightSum { layout: f64, text: f64, sum: f64 },

    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("distance cutoffs must satisfy exact <= high <= low, got exact={exact} high={high} low={low}")]
    DistanceOrdering { exact: u32, high: u32, low: u32 },

    #[error("similarity cutoffs must satisfy exact >= high >= low, got exact={exact} high={high} low={low}")]
    SimilarityOrdering { exact: f64, high: f64, low: f64 },

    #[error("report bands must satisfy moderate <= strong, got strong={strong} moderate={moderate}")]
    BandOrdering { strong: f64, moderate: f64 },

    #[error("cannot load settings: {0}")]
    Load(String),
}

impl ConfigError {
    /// Check that `value` lies in `[min, max]`. NaN is always rejected.
    pub(crate) fn check_range(
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    ) -> Result<(), ConfigError> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                name,
                value,
                min,
                max,
            })
        }
    }

    pub(crate) fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
        Self::check_range(name, value, 0.0, 1.0)
    }
}

/// Errors from comparisons that depend on externally supplied signals.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{side} slide {slide} has no {signal}")]
    MissingSignal {
        side: &'static str,
        slide: usize,
        signal: &'static str,
    },

    #[error("perceptual hashes differ in length: {left} vs {right} bits")]
    HashLengthMismatch { left: usize, right: usize },

    #[error("text vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type MatchResult<T> = Result<T, MatchError>;
