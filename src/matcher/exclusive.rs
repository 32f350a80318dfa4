//! Greedy one-to-one assignment over fused element vectors.

use super::{ElementPair, MatchPolicy, SlideMatch, SlideMatcher};
use crate::signals::{fused_vector, similarity_matrix, thresholds};
use crate::types::Slide;

/// Pairs source elements with target elements one-to-one.
///
/// Each element is represented by its fused vector (embedding followed by
/// the bounding box) and compared by cosine similarity. Source elements are
/// visited in order; each takes the best target element that is still free
/// and whose similarity exceeds the threshold. A taken target element is
/// never reused within the same comparison.
///
/// Score: `matched / min(|source|, |target|)`, unrounded.
#[derive(Debug, Clone, Copy)]
pub struct ExclusiveMatcher {
    threshold: f64,
}

impl ExclusiveMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ExclusiveMatcher {
    fn default() -> Self {
        Self::new(thresholds::EXCLUSIVE_MATCH)
    }
}

impl SlideMatcher for ExclusiveMatcher {
    fn policy(&self) -> MatchPolicy {
        MatchPolicy::Exclusive
    }

    fn compare(&self, source: &Slide, target: &Slide) -> SlideMatch {
        if source.elements.is_empty() || target.elements.is_empty() {
            return SlideMatch::empty();
        }

        let left: Vec<Vec<f32>> = source.elements.iter().map(fused_vector).collect();
        let right: Vec<Vec<f32>> = target.elements.iter().map(fused_vector).collect();
        let matrix = similarity_matrix(&left, &right);

        let mut consumed = vec![false; right.len()];
        let mut pairs = Vec::new();

        for (i, row) in matrix.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for (j, &similarity) in row.iter().enumerate() {
                if consumed[j] || similarity <= self.threshold {
                    continue;
                }
                if best.is_none_or(|(_, b)| similarity > b) {
                    best = Some((j, similarity));
                }
            }

            if let Some((j, score)) = best {
                consumed[j] = true;
                pairs.push(ElementPair {
                    source: i,
                    target: j,
                    score,
                });
            }
        }

        let total = left.len().min(right.len());
        SlideMatch {
            score: pairs.len() as f64 / total as f64,
            pairs,
        }
    }
}
