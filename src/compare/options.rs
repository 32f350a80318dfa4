//! Options for cross-deck comparisons.

use serde::Serialize;

use crate::error::ConfigError;
use crate::matcher::{MatchPolicy, SlideMatcher, matcher_for};
use crate::signals::thresholds;
use crate::similarity::SimilarityConfig;

/// Default cutoff for keeping a cross-deck candidate.
pub const DEFAULT_RANK_THRESHOLD: f64 = 0.7;

/// Validated options for ranking one deck against another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonOptions {
    policy: MatchPolicy,
    rank_threshold: f64,
    exclusive_threshold: f64,
    skip_leading: usize,
}

impl ComparisonOptions {
    pub fn new(
        policy: MatchPolicy,
        rank_threshold: f64,
        exclusive_threshold: f64,
        skip_leading: usize,
    ) -> Result<Self, ConfigError> {
        ConfigError::check_unit("rank_threshold", rank_threshold)?;
        ConfigError::check_unit("exclusive_threshold", exclusive_threshold)?;
        Ok(Self {
            policy,
            rank_threshold,
            exclusive_threshold,
            skip_leading,
        })
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn rank_threshold(&self) -> f64 {
        self.rank_threshold
    }

    pub fn exclusive_threshold(&self) -> f64 {
        self.exclusive_threshold
    }

    /// Number of leading slides each deck drops before comparison.
    pub fn skip_leading(&self) -> usize {
        self.skip_leading
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_skip_leading(mut self, skip_leading: usize) -> Self {
        self.skip_leading = skip_leading;
        self
    }

    /// The slide matcher these options select.
    pub fn matcher(&self, config: SimilarityConfig) -> Box<dyn SlideMatcher> {
        matcher_for(self.policy, config, self.exclusive_threshold)
    }
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::Coverage,
            rank_threshold: DEFAULT_RANK_THRESHOLD,
            exclusive_threshold: thresholds::EXCLUSIVE_MATCH,
            skip_leading: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert!(ComparisonOptions::new(MatchPolicy::Coverage, 0.7, 0.85, 1).is_ok());
        assert!(matches!(
            ComparisonOptions::new(MatchPolicy::Coverage, 1.7, 0.85, 0),
            Err(ConfigError::OutOfRange {
                name: "rank_threshold",
                ..
            })
        ));
        assert!(ComparisonOptions::new(MatchPolicy::Exclusive, 0.7, -0.2, 0).is_err());
    }

    #[test]
    fn test_builders() {
        let options = ComparisonOptions::default()
            .with_policy(MatchPolicy::Exclusive)
            .with_skip_leading(1);
        assert_eq!(options.policy(), MatchPolicy::Exclusive);
        assert_eq!(options.skip_leading(), 1);
        assert_eq!(
            options.matcher(SimilarityConfig::default()).policy(),
            MatchPolicy::Exclusive
        );
    }
}
