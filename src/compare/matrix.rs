//! Square slide-to-slide matrix of text vector similarities.

use crate::error::{MatchError, MatchResult};
use crate::signals::similarity_matrix;
use crate::types::Slide;

/// Cosine similarity between the text vectors of every pair of slides.
///
/// `matrix[i][j]` compares `slides[i]` with `slides[j]`; the diagonal is 1.0
/// for any non-zero vector. Every slide needs a text vector and all vectors
/// must share one dimension.
pub fn embedding_matrix(slides: &[Slide]) -> MatchResult<Vec<Vec<f64>>> {
    let mut vectors: Vec<&[f32]> = Vec::with_capacity(slides.len());
    for slide in slides {
        let vector = slide
            .text_vector
            .as_deref()
            .ok_or(MatchError::MissingSignal {
                side: "deck",
                slide: slide.index,
                signal: "text vector",
            })?;
        if let Some(expected) = vectors
            .first()
            .map(|first| first.len())
            .filter(|&len| len != vector.len())
        {
            return Err(MatchError::DimensionMismatch {
                expected,
                got: vector.len(),
            });
        }
        vectors.push(vector);
    }

    tracing::debug!(target: "compare", "embedding matrix over {} slides", vectors.len());
    Ok(similarity_matrix(&vectors, &vectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::PerceptualHash;
    use crate::types::Deck;

    fn with_vector(vector: Vec<f32>) -> Slide {
        Slide::default().with_signals(PerceptualHash::from_u64(0), vector)
    }

    #[test]
    fn test_square_and_symmetric() {
        let deck = Deck::new(
            "deck",
            None,
            vec![
                with_vector(vec![1.0, 0.0]),
                with_vector(vec![1.0, 1.0]),
                with_vector(vec![0.0, 3.0]),
            ],
        );
        let matrix = embedding_matrix(&deck.slides).unwrap();
        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert_eq!(matrix[i].len(), 3);
            assert!((matrix[i][i] - 1.0).abs() < 1e-9);
            for j in 0..3 {
                assert!((matrix[i][j] - matrix[j][i]).abs() < 1e-12);
            }
        }
        assert!(matrix[0][2].abs() < 1e-9);
    }

    #[test]
    fn test_missing_vector() {
        let deck = Deck::new(
            "deck",
            None,
            vec![with_vector(vec![1.0]), Slide::default()],
        );
        assert_eq!(
            embedding_matrix(&deck.slides),
            Err(MatchError::MissingSignal {
                side: "deck",
                slide: 1,
                signal: "text vector"
            })
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let deck = Deck::new(
            "deck",
            None,
            vec![with_vector(vec![1.0, 0.0]), with_vector(vec![1.0])],
        );
        assert_eq!(
            embedding_matrix(&deck.slides),
            Err(MatchError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_empty_deck() {
        assert!(embedding_matrix(&[]).unwrap().is_empty());
    }
}
