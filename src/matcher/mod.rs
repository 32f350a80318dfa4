//! Slide-to-slide matching policies.
//!
//! Two policies answer different questions and are never substituted for
//! each other silently:
//!
//! - [`MatchPolicy::Coverage`]: how much of slide A is covered by something
//!   similar in slide B. Non-exclusive and asymmetric; normalized by the
//!   larger slide and rounded to 2 decimals.
//! - [`MatchPolicy::Exclusive`]: how many elements pair up one-to-one,
//!   using fused embedding + geometry vectors. Normalized by the smaller
//!   slide.
//!
//! Callers pick a policy explicitly and get a [`SlideMatcher`] back.

mod coverage;
mod exclusive;

pub use coverage::CoverageMatcher;
pub use exclusive::ExclusiveMatcher;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::similarity::SimilarityConfig;
use crate::types::Slide;

/// Which element-matching policy a comparison uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Independent best-match coverage (non-exclusive).
    #[default]
    Coverage,
    /// Greedy one-to-one assignment over fused vectors.
    Exclusive,
}

impl MatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coverage => "coverage",
            Self::Exclusive => "exclusive",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coverage" => Ok(Self::Coverage),
            "exclusive" => Ok(Self::Exclusive),
            other => Err(format!(
                "unknown match policy '{other}' (expected coverage or exclusive)"
            )),
        }
    }
}

/// A matched element pair inside one slide comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementPair {
    /// Element index in the source slide.
    pub source: usize,
    /// Element index in the target slide.
    pub target: usize,
    pub score: f64,
}

impl ElementPair {
    /// The same pair seen from the target side.
    pub fn flipped(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            score: self.score,
        }
    }
}

/// Outcome of comparing two slides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideMatch {
    /// Slide score in `[0, 1]`.
    pub score: f64,
    /// Element pairs that counted towards the score.
    pub pairs: Vec<ElementPair>,
}

impl SlideMatch {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn matched(&self) -> usize {
        self.pairs.len()
    }
}

/// Slide-level comparison behind a single interface.
pub trait SlideMatcher: Send + Sync {
    fn policy(&self) -> MatchPolicy;

    /// Compare `source` against `target`.
    fn compare(&self, source: &Slide, target: &Slide) -> SlideMatch;

    /// Slide score without the evidence.
    fn score(&self, source: &Slide, target: &Slide) -> f64 {
        self.compare(source, target).score
    }
}

/// Build the matcher for `policy`.
///
/// `exclusive_threshold` only applies to [`MatchPolicy::Exclusive`].
pub fn matcher_for(
    policy: MatchPolicy,
    config: SimilarityConfig,
    exclusive_threshold: f64,
) -> Box<dyn SlideMatcher> {
    match policy {
        MatchPolicy::Coverage => Box::new(CoverageMatcher::new(config)),
        MatchPolicy::Exclusive => Box::new(ExclusiveMatcher::new(exclusive_threshold)),
    }
}

/// Round to 2 decimal places, ties to even.
///
/// Rounds the exact binary value, so 19/40 (stored just below 0.475) gives
/// 0.47. Scaling by 100 first would land on 47.5 and round up.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!("coverage".parse::<MatchPolicy>(), Ok(MatchPolicy::Coverage));
        assert_eq!(
            "Exclusive".parse::<MatchPolicy>(),
            Ok(MatchPolicy::Exclusive)
        );
        assert!("bipartite".parse::<MatchPolicy>().is_err());
        assert_eq!(MatchPolicy::Exclusive.to_string(), "exclusive");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        // Half-way cases go to the even neighbour
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn test_round2_uses_stored_value() {
        assert_eq!(round2(19.0 / 40.0), 0.47);
        assert_eq!(round2(1.0 / 40.0), 0.03);
        assert_eq!(round2(3.0 / 40.0), 0.07);
        assert_eq!(round2(39.0 / 40.0), 0.97);
    }

    #[test]
    fn test_factory_selects_policy() {
        let config = SimilarityConfig::default();
        assert_eq!(
            matcher_for(MatchPolicy::Coverage, config, 0.85).policy(),
            MatchPolicy::Coverage
        );
        assert_eq!(
            matcher_for(MatchPolicy::Exclusive, config, 0.85).policy(),
            MatchPolicy::Exclusive
        );
    }

    #[test]
    fn test_flipped_pair() {
        let pair = ElementPair {
            source: 1,
            target: 4,
            score: 0.9,
        };
        let back = pair.flipped();
        assert_eq!((back.source, back.target), (4, 1));
        assert_eq!(back.flipped(), pair);
    }
}
