//! Geometry, text and element similarity.
//!
//! These are the leaves of the matching engine. All functions are pure and
//! deterministic.

mod config;
mod element;
mod geometry;
mod text;

pub use config::{ConfigHandle, SimilarityConfig, WEIGHT_SUM_TOLERANCE};
pub use element::element_similarity;
pub use geometry::geometry_similarity;
pub use text::{matched_len, ratio, text_similarity};
