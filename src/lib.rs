//! Multi-signal slide similarity matching.
//!
//! Slides are compared by element layout and text ([`similarity`],
//! [`matcher`]), by externally computed embeddings and image hashes
//! ([`signals`], [`grading`]), and decks are compared as a whole by the
//! modes in [`compare`].

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod grading;
pub mod io;
pub mod logging;
pub mod matcher;
pub mod signals;
pub mod similarity;
pub mod types;

pub use compare::{
    BandEdges, BandedReport, ComparisonOptions, CrossDeckRanking, GradedSlide, SlidePair,
    embedding_matrix, find_similar_pairs, grade_correspondences, rank_correspondences,
};
pub use config::Settings;
pub use error::{ConfigError, MatchError, MatchResult};
pub use grading::{Grade, GradeThresholds, grade};
pub use matcher::{MatchPolicy, SlideMatch, SlideMatcher, matcher_for};
pub use signals::PerceptualHash;
pub use similarity::{
    ConfigHandle, SimilarityConfig, element_similarity, geometry_similarity, text_similarity,
};
pub use types::{BoundingBox, Deck, Element, ElementKind, Slide};
