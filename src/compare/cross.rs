//! Ranked correspondences between two decks.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::matcher::{ElementPair, SlideMatch, SlideMatcher};
use crate::types::Slide;

/// A candidate counterpart for one slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Deck index of the counterpart slide.
    pub index: usize,
    pub score: f64,
    /// Element pairs behind the score, from this slide's point of view.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence: Vec<ElementPair>,
}

/// One slide with its ranked counterparts in the other deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSlide {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Best first; equal scores keep counterpart deck order.
    pub candidates: Vec<Candidate>,
}

impl RankedSlide {
    /// No counterpart reached the threshold.
    pub fn is_unmatched(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }
}

/// Ranked correspondences in both directions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrossDeckRanking {
    /// Source slide → target candidates.
    pub forward: Vec<RankedSlide>,
    /// Target slide → source candidates, from the same scores.
    pub backward: Vec<RankedSlide>,
}

impl CrossDeckRanking {
    /// Source slides with no candidate at all.
    pub fn unmatched_sources(&self) -> impl Iterator<Item = &RankedSlide> {
        self.forward.iter().filter(|s| s.is_unmatched())
    }

    /// Flat `(source, target, score)` triples in ranked order.
    pub fn correspondences(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.forward
            .iter()
            .flat_map(|s| s.candidates.iter().map(move |c| (s.index, c.index, c.score)))
    }
}

/// Score every source slide against every target slide and rank.
///
/// Each source slide keeps the targets scoring at least `threshold`, sorted
/// best first with a stable sort. The mirror lists are filled from the same
/// score matrix. All scores of a row are collected before any sorting, so
/// parallel evaluation never changes the order of ties.
pub fn rank_correspondences(
    source: &[Slide],
    target: &[Slide],
    matcher: &dyn SlideMatcher,
    threshold: f64,
) -> CrossDeckRanking {
    let matrix: Vec<Vec<SlideMatch>> = source
        .par_iter()
        .map(|s| target.iter().map(|t| matcher.compare(s, t)).collect())
        .collect();

    let forward = source
        .iter()
        .zip(matrix.iter())
        .map(|(slide, row)| {
            let candidates = row
                .iter()
                .zip(target)
                .filter(|(m, _)| m.score >= threshold)
                .map(|(m, t)| Candidate {
                    index: t.index,
                    score: m.score,
                    evidence: m.pairs.clone(),
                })
                .collect();
            ranked(slide, candidates)
        })
        .collect();

    let backward = target
        .iter()
        .enumerate()
        .map(|(j, slide)| {
            let candidates = source
                .iter()
                .zip(matrix.iter())
                .filter(|(_, row)| row[j].score >= threshold)
                .map(|(s, row)| Candidate {
                    index: s.index,
                    score: row[j].score,
                    evidence: row[j].pairs.iter().map(|p| p.flipped()).collect(),
                })
                .collect();
            ranked(slide, candidates)
        })
        .collect();

    let ranking = CrossDeckRanking { forward, backward };
    tracing::debug!(
        target: "compare",
        "cross-deck ({}): {}x{} slides, {} correspondences, {} unmatched sources",
        matcher.policy(),
        source.len(),
        target.len(),
        ranking.correspondences().count(),
        ranking.unmatched_sources().count()
    );
    ranking
}

fn ranked(slide: &Slide, mut candidates: Vec<Candidate>) -> RankedSlide {
    // sort_by is stable: equal scores keep deck order
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    RankedSlide {
        index: slide.index,
        title: slide.title.clone(),
        candidates,
    }
}
