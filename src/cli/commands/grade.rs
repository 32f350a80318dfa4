//! Cross-deck grading by image hash and text vector.

use std::path::Path;
use std::time::Instant;

use crate::cli::args::RangeArgs;
use crate::compare::grade_correspondences;
use crate::config::Settings;
use crate::io::{EntityType, Envelope, ExitCode, load_deck};

use super::{elapsed_ms, emit};

pub fn run(
    source_path: &Path,
    target_path: &Path,
    range: &RangeArgs,
    mut settings: Settings,
    json: bool,
) -> anyhow::Result<ExitCode> {
    range.apply(&mut settings);
    let engine = settings.validate()?;
    let skip = engine.comparison.skip_leading();

    let source = load_deck(source_path)?;
    let target = load_deck(target_path)?;
    crate::debug_event!("grade", "thresholds", "{:?}", engine.grading);

    let start = Instant::now();
    let graded = grade_correspondences(
        source.skip_leading(skip),
        target.skip_leading(skip),
        &engine.grading,
    )?;
    let count: usize = graded.iter().map(|slide| slide.similars.len()).sum();

    let envelope = if count == 0 {
        Envelope::not_found(graded, "No similar slides found")
    } else {
        Envelope::success(graded).with_message(format!("Graded {count} similar slide pairs"))
    }
    .with_entity_type(EntityType::Grades)
    .with_count(count)
    .with_duration_ms(elapsed_ms(start));

    emit(json, envelope, |graded| {
        for slide in graded {
            if slide.similars.is_empty() {
                continue;
            }
            println!("slide {:>3}  {}", slide.index, slide.title.as_deref().unwrap_or(""));
            for similar in &slide.similars {
                println!(
                    "      -> slide {:>3}  {:<5} distance={:<3} similarity={:.2}",
                    similar.target_index,
                    similar.grade.as_str(),
                    similar.distance_score,
                    similar.similarity_score
                );
            }
        }
    })
}
