//! Tiered grading from two independent slide signals.
//!
//! A *distance* signal (perceptual hash Hamming distance, lower is closer)
//! and a *similarity* signal (text embedding cosine, higher is closer) are
//! checked against three tiers in order: exact, high, low. A slide pair
//! lands in the first tier where **either** signal passes its cutoff.
//!
//! The OR is deliberately permissive. A pair whose images differ because of
//! a re-styled theme is still rescued by its text, and a pair whose text was
//! lightly edited is rescued by its image. The cost is false positives, and
//! the grade alone cannot tell "both signals agree" from "one rescued it".
//! Graded records therefore always carry both raw signal values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;
use crate::signals::thresholds;

/// Outcome of grading one slide pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Match,
    High,
    Low,
    Different,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::High => "high",
            Self::Low => "low",
            Self::Different => "different",
        }
    }

    /// Whether the pair is recorded as a correspondence.
    pub fn is_similar(&self) -> bool {
        !matches!(self, Self::Different)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default Hamming distance cutoffs (64-bit pHash).
pub mod distance_defaults {
    pub const EXACT: u32 = 0;
    pub const HIGH: u32 = 4;
    pub const LOW: u32 = 10;
}

/// Cutoffs for the three grade tiers, per signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeThresholds {
    distance_exact: u32,
    distance_high: u32,
    distance_low: u32,
    similarity_exact: f64,
    similarity_high: f64,
    similarity_low: f64,
}

impl GradeThresholds {
    /// Validate and build the thresholds.
    ///
    /// Distance cutoffs must loosen (`exact <= high <= low`) and similarity
    /// cutoffs must loosen (`exact >= high >= low`, all within `[-1, 1]`),
    /// so each tier's condition implies the next one's.
    pub fn new(
        distance: (u32, u32, u32),
        similarity: (f64, f64, f64),
    ) -> Result<Self, ConfigError> {
        let (distance_exact, distance_high, distance_low) = distance;
        if !(distance_exact <= distance_high && distance_high <= distance_low) {
            return Err(ConfigError::DistanceOrdering {
                exact: distance_exact,
                high: distance_high,
                low: distance_low,
            });
        }

        let (similarity_exact, similarity_high, similarity_low) = similarity;
        ConfigError::check_range("similarity_exact", similarity_exact, -1.0, 1.0)?;
        ConfigError::check_range("similarity_high", similarity_high, -1.0, 1.0)?;
        ConfigError::check_range("similarity_low", similarity_low, -1.0, 1.0)?;
        if !(similarity_exact >= similarity_high && similarity_high >= similarity_low) {
            return Err(ConfigError::SimilarityOrdering {
                exact: similarity_exact,
                high: similarity_high,
                low: similarity_low,
            });
        }

        Ok(Self {
            distance_exact,
            distance_high,
            distance_low,
            similarity_exact,
            similarity_high,
            similarity_low,
        })
    }

    /// `(grade, distance cutoff, similarity cutoff)` from strictest to loosest.
    fn tiers(&self) -> [(Grade, u32, f64); 3] {
        [
            (Grade::Match, self.distance_exact, self.similarity_exact),
            (Grade::High, self.distance_high, self.similarity_high),
            (Grade::Low, self.distance_low, self.similarity_low),
        ]
    }

    pub fn distance_cutoffs(&self) -> (u32, u32, u32) {
        (self.distance_exact, self.distance_high, self.distance_low)
    }

    pub fn similarity_cutoffs(&self) -> (f64, f64, f64) {
        (self.similarity_exact, self.similarity_high, self.similarity_low)
    }
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            distance_exact: distance_defaults::EXACT,
            distance_high: distance_defaults::HIGH,
            distance_low: distance_defaults::LOW,
            similarity_exact: thresholds::TEXT_EXACT,
            similarity_high: thresholds::TEXT_HIGH,
            similarity_low: thresholds::TEXT_LOW,
        }
    }
}

/// Grade a slide pair from its distance and similarity signals.
pub fn grade(distance: u32, similarity: f64, thresholds: &GradeThresholds) -> Grade {
    thresholds
        .tiers()
        .into_iter()
        .find(|(_, max_distance, min_similarity)| {
            distance <= *max_distance || similarity >= *min_similarity
        })
        .map_or(Grade::Different, |(grade, _, _)| grade)
}
