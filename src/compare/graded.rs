//! Graded cross-deck correspondences from image hashes and text vectors.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{MatchError, MatchResult};
use crate::grading::{Grade, GradeThresholds, grade};
use crate::signals::{PerceptualHash, cosine_similarity};
use crate::types::Slide;

/// A graded counterpart of one source slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedCorrespondence {
    pub target_index: usize,
    /// Never [`Grade::Different`]; those pairs are omitted.
    pub grade: Grade,
    /// Hamming distance between the slide image hashes.
    pub distance_score: u32,
    /// Cosine similarity between the slide text vectors.
    pub similarity_score: f64,
}

/// A source slide with its graded counterparts, in target deck order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedSlide {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub similars: Vec<GradedCorrespondence>,
}

impl GradedSlide {
    /// Counterparts with the given grade.
    pub fn with_grade(&self, wanted: Grade) -> impl Iterator<Item = &GradedCorrespondence> {
        self.similars.iter().filter(move |s| s.grade == wanted)
    }
}

/// Both signals of one slide, borrowed.
struct Signals<'a> {
    hash: &'a PerceptualHash,
    vector: &'a [f32],
}

fn collect_signals<'a>(slides: &'a [Slide], side: &'static str) -> MatchResult<Vec<Signals<'a>>> {
    slides
        .iter()
        .map(|slide| {
            let hash = slide.image_hash.as_ref().ok_or(MatchError::MissingSignal {
                side,
                slide: slide.index,
                signal: "image hash",
            })?;
            let vector = slide.text_vector.as_deref().ok_or(MatchError::MissingSignal {
                side,
                slide: slide.index,
                signal: "text vector",
            })?;
            Ok(Signals { hash, vector })
        })
        .collect()
}

/// Grade every source slide against every target slide.
///
/// Every slide on both sides must carry an image hash and a text vector;
/// a missing signal or mismatched hash length / vector dimension is
/// reported before any result is produced. Pairs graded
/// [`Grade::Different`] are left out.
pub fn grade_correspondences(
    source: &[Slide],
    target: &[Slide],
    thresholds: &GradeThresholds,
) -> MatchResult<Vec<GradedSlide>> {
    let source_signals = collect_signals(source, "source")?;
    let target_signals = collect_signals(target, "target")?;

    let graded: Vec<GradedSlide> = source
        .par_iter()
        .zip(source_signals.par_iter())
        .map(|(slide, left)| {
            let mut similars = Vec::new();
            for (other, right) in target.iter().zip(target_signals.iter()) {
                let distance = left.hash.distance(right.hash)?;
                if left.vector.len() != right.vector.len() {
                    return Err(MatchError::DimensionMismatch {
                        expected: left.vector.len(),
                        got: right.vector.len(),
                    });
                }
                let similarity = cosine_similarity(left.vector, right.vector);

                let verdict = grade(distance, similarity, thresholds);
                if verdict.is_similar() {
                    tracing::trace!(
                        target: "grade",
                        "{verdict}: source {} target {} (distance={distance} similarity={similarity:.2})",
                        slide.index,
                        other.index
                    );
                    similars.push(GradedCorrespondence {
                        target_index: other.index,
                        grade: verdict,
                        distance_score: distance,
                        similarity_score: similarity,
                    });
                }
            }
            Ok(GradedSlide {
                index: slide.index,
                title: slide.title.clone(),
                similars,
            })
        })
        .collect::<MatchResult<Vec<_>>>()?;

    tracing::debug!(
        target: "grade",
        "graded {}x{} slides, {} correspondences",
        source.len(),
        target.len(),
        graded.iter().map(|g| g.similars.len()).sum::<usize>()
    );
    Ok(graded)
}
