//! External numeric signals: embeddings, fused element vectors, image hashes.
//!
//! Nothing here computes embeddings or hashes. They are produced upstream
//! and consumed as opaque vectors and bit signatures.

mod hash;

pub use hash::{HashParseError, PerceptualHash};

use crate::types::{Element, Slide};

/// Cosine similarity thresholds used for text embeddings.
pub mod thresholds {
    /// Element pairs above this are considered the same content (exclusive matching).
    pub const EXCLUSIVE_MATCH: f64 = 0.85;

    /// Slide text vectors at or above this grade as an exact match.
    pub const TEXT_EXACT: f64 = 0.95;

    /// Slide text vectors at or above this grade as highly similar.
    pub const TEXT_HIGH: f64 = 0.90;

    /// Slide text vectors at or above this grade as possibly similar.
    pub const TEXT_LOW: f64 = 0.80;
}

/// Calculate cosine similarity between two vectors.
///
/// Returns 0.0 for empty, zero-magnitude or differently sized vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }
    (dot / denom).clamp(-1.0, 1.0)
}

/// Row-major cosine similarity matrix, `rows[i][j] = cos(left[i], right[j])`.
pub fn similarity_matrix<L, R>(left: &[L], right: &[R]) -> Vec<Vec<f64>>
where
    L: AsRef<[f32]>,
    R: AsRef<[f32]>,
{
    left.iter()
        .map(|l| {
            right
                .iter()
                .map(|r| cosine_similarity(l.as_ref(), r.as_ref()))
                .collect()
        })
        .collect()
}

/// Element content and position fused into one vector: `embedding ++ box`.
///
/// Elements without an embedding contribute only their geometry.
pub fn fused_vector(element: &Element) -> Vec<f32> {
    let embedding = element.embedding.as_deref().unwrap_or(&[]);
    let mut fused = Vec::with_capacity(embedding.len() + 4);
    fused.extend_from_slice(embedding);
    fused.extend(element.bbox.to_array().iter().map(|v| *v as f32));
    fused
}

/// Component-wise mean of equally sized vectors.
///
/// `None` when there are no vectors or their dimensions disagree.
pub fn mean_vector<V: AsRef<[f32]>>(vectors: &[V]) -> Option<Vec<f32>> {
    let first = vectors.first()?.as_ref();
    let dim = first.len();
    if vectors.iter().any(|v| v.as_ref().len() != dim) {
        return None;
    }

    let mut sum = vec![0.0f64; dim];
    for vector in vectors {
        for (acc, value) in sum.iter_mut().zip(vector.as_ref()) {
            *acc += f64::from(*value);
        }
    }
    let count = vectors.len() as f64;
    Some(sum.into_iter().map(|v| (v / count) as f32).collect())
}

/// Mean fused vector of a slide's elements.
pub fn slide_centroid(slide: &Slide) -> Option<Vec<f32>> {
    let fused: Vec<Vec<f32>> = slide.elements.iter().map(fused_vector).collect();
    mean_vector(&fused)
}

/// Cosine similarity between the centroids of two slides.
///
/// A coarse whole-slide signal: 0.0 when either slide has no elements or the
/// centroids cannot be formed.
pub fn centroid_similarity(a: &Slide, b: &Slide) -> f64 {
    match (slide_centroid(a), slide_centroid(b)) {
        (Some(ca), Some(cb)) => cosine_similarity(&ca, &cb),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    #[test]
    fn test_cosine_similarity() {
        // Identical vectors
        let v1 = vec![1.0, 0.0, 0.0];
        let v2 = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&v1, &v2) - 1.0).abs() < 0.001);

        // Orthogonal vectors
        let v3 = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&v1, &v3) - 0.0).abs() < 0.001);

        // Opposite vectors
        let v4 = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&v1, &v4) - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_similarity_matrix_shape() {
        let left = vec![vec![1.0f32, 0.0], vec![0.0, 1.0]];
        let right = vec![vec![1.0f32, 0.0], vec![1.0, 1.0], vec![0.0, 2.0]];
        let matrix = similarity_matrix(&left, &right);
        assert_eq!(matrix.len(), 2);
        assert!(matrix.iter().all(|row| row.len() == 3));
        assert!((matrix[0][0] - 1.0).abs() < 1e-9);
        assert!((matrix[1][2] - 1.0).abs() < 1e-9);
        assert!((matrix[0][1] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_fused_vector_appends_geometry() {
        let bbox = BoundingBox::new(0.1, 0.2, 0.3, 0.4);
        let plain = Element::text("x", bbox);
        assert_eq!(fused_vector(&plain), vec![0.1, 0.2, 0.3, 0.4]);

        let embedded = Element::text("x", bbox).with_embedding(vec![0.5, 0.5]);
        assert_eq!(fused_vector(&embedded), vec![0.5, 0.5, 0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_mean_vector() {
        let vectors = vec![vec![1.0f32, 3.0], vec![3.0, 5.0]];
        assert_eq!(mean_vector(&vectors), Some(vec![2.0, 4.0]));

        let empty: Vec<Vec<f32>> = Vec::new();
        assert_eq!(mean_vector(&empty), None);

        let ragged = vec![vec![1.0f32], vec![1.0, 2.0]];
        assert_eq!(mean_vector(&ragged), None);
    }

    #[test]
    fn test_centroid_similarity() {
        let bbox = BoundingBox::new(0.1, 0.1, 0.5, 0.2);
        let a = Slide::new(vec![Element::text("a", bbox).with_embedding(vec![1.0, 0.0])]);
        let b = Slide::new(vec![Element::text("b", bbox).with_embedding(vec![1.0, 0.0])]);
        assert!((centroid_similarity(&a, &b) - 1.0).abs() < 1e-6);
        assert_eq!(centroid_similarity(&a, &Slide::default()), 0.0);
    }
}
