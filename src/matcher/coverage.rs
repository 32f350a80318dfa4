//! Independent best-match coverage.

use super::{ElementPair, MatchPolicy, SlideMatch, SlideMatcher, round2};
use crate::similarity::SimilarityConfig;
use crate::types::Slide;

/// For every source element, find its best counterpart anywhere in the
/// target slide. A source element counts as matched when that best score
/// reaches `element_threshold`. Several source elements may match the same
/// target element.
///
/// Score: `matched / max(|source|, |target|)`, rounded to 2 decimals.
#[derive(Debug, Clone, Copy)]
pub struct CoverageMatcher {
    config: SimilarityConfig,
}

impl CoverageMatcher {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }
}

impl SlideMatcher for CoverageMatcher {
    fn policy(&self) -> MatchPolicy {
        MatchPolicy::Coverage
    }

    fn compare(&self, source: &Slide, target: &Slide) -> SlideMatch {
        if source.elements.is_empty() || target.elements.is_empty() {
            return SlideMatch::empty();
        }

        let threshold = self.config.element_threshold();
        let mut pairs = Vec::new();

        for (i, element) in source.elements.iter().enumerate() {
            // First-seen maximum wins on ties
            let mut best: Option<(usize, f64)> = None;
            for (j, candidate) in target.elements.iter().enumerate() {
                let score = self.config.score_elements(element, candidate);
                if best.is_none_or(|(_, b)| score > b) {
                    best = Some((j, score));
                }
            }

            if let Some((j, score)) = best.filter(|(_, score)| *score >= threshold) {
                pairs.push(ElementPair {
                    source: i,
                    target: j,
                    score,
                });
            }
        }

        let total = source.elements.len().max(target.elements.len());
        SlideMatch {
            score: round2(pairs.len() as f64 / total as f64),
            pairs,
        }
    }
}
