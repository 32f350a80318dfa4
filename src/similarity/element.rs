//! Element-to-element similarity.

use super::config::SimilarityConfig;
use super::geometry::geometry_similarity;
use super::text::text_similarity;
use crate::types::Element;

/// Weighted geometry + text similarity of two elements.
///
/// Elements of different kinds score 0.0 without evaluating geometry or
/// text. Weights are applied as given; callers supply values that already
/// sum appropriately.
pub fn element_similarity(
    a: &Element,
    b: &Element,
    layout_weight: f64,
    text_weight: f64,
    strict: bool,
) -> f64 {
    if a.kind != b.kind {
        return 0.0;
    }
    layout_weight * geometry_similarity(&a.bbox, &b.bbox)
        + text_weight * text_similarity(&a.text, &b.text, strict)
}

impl SimilarityConfig {
    /// Score two elements with this configuration's weights and text mode.
    pub fn score_elements(&self, a: &Element, b: &Element) -> f64 {
        element_similarity(
            a,
            b,
            self.layout_weight(),
            self.text_weight(),
            self.text_strict(),
        )
    }
}
