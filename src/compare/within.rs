//! All-pairs search inside a single deck.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::matcher::{CoverageMatcher, SlideMatcher};
use crate::similarity::SimilarityConfig;
use crate::types::Slide;

/// Two slides of the same deck that look alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlidePair {
    pub source: usize,
    pub target: usize,
    pub score: f64,
}

/// Find near-duplicate slides within one deck.
///
/// Every unordered pair `i < j` of `slides` is scored once with coverage
/// matching; pairs scoring at least `slide_threshold` are returned in
/// `(i, j)` order. Indices are the slides' deck indices.
pub fn find_similar_pairs(slides: &[Slide], config: &SimilarityConfig) -> Vec<SlidePair> {
    let matcher = CoverageMatcher::new(*config);
    let threshold = config.slide_threshold();

    let candidates: Vec<(usize, usize)> = (0..slides.len())
        .flat_map(|i| (i + 1..slides.len()).map(move |j| (i, j)))
        .collect();

    let pairs: Vec<SlidePair> = candidates
        .par_iter()
        .filter_map(|&(i, j)| {
            let score = matcher.score(&slides[i], &slides[j]);
            (score >= threshold).then(|| SlidePair {
                source: slides[i].index,
                target: slides[j].index,
                score,
            })
        })
        .collect();

    tracing::debug!(
        target: "compare",
        "within-deck: {} slides, {} pairs evaluated, {} above {threshold}",
        slides.len(),
        candidates.len(),
        pairs.len()
    );

    pairs
}
