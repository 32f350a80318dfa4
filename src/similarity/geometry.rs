//! Layout similarity of two normalized bounding boxes.

use crate::types::BoundingBox;

/// `1 - min(euclidean distance, 1)` over `[left, top, width, height]`.
///
/// Identical boxes score 1.0; boxes at distance 1.0 or more score 0.0.
pub fn geometry_similarity(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let distance = a
        .to_array()
        .iter()
        .zip(b.to_array().iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt();
    1.0 - distance.min(1.0)
}
