//! Deck-level comparison modes.
//!
//! - within one deck: near-duplicate slide pairs ([`find_similar_pairs`])
//! - across two decks: ranked candidates per slide ([`rank_correspondences`])
//!   and graded image/text correspondences ([`grade_correspondences`])
//!
//! Every mode takes slide slices, so callers restrict a run to an index range
//! with [`Deck::window`](crate::types::Deck::window). Results always carry deck
//! indices.

mod cross;
mod graded;
mod matrix;
mod options;
mod report;
mod within;

pub use cross::{Candidate, CrossDeckRanking, RankedSlide, rank_correspondences};
pub use graded::{GradedCorrespondence, GradedSlide, grade_correspondences};
pub use matrix::embedding_matrix;
pub use options::{ComparisonOptions, DEFAULT_RANK_THRESHOLD};
pub use report::{BandEdges, BandEntry, BandedReport, ScoreBand};
pub use within::{SlidePair, find_similar_pairs};
