//! Text vector similarity matrix of one deck.

use std::path::Path;
use std::time::Instant;

use crate::cli::args::RangeArgs;
use crate::compare::embedding_matrix;
use crate::config::Settings;
use crate::io::{EntityType, Envelope, ExitCode, load_deck};

use super::{elapsed_ms, emit};

pub fn run(
    deck_path: &Path,
    range: &RangeArgs,
    mut settings: Settings,
    json: bool,
) -> anyhow::Result<ExitCode> {
    range.apply(&mut settings);
    let engine = settings.validate()?;
    let skip = engine.comparison.skip_leading();

    let deck = load_deck(deck_path)?;
    let slides = deck.skip_leading(skip);
    let start = Instant::now();
    let matrix = embedding_matrix(slides)?;
    let indices: Vec<usize> = slides.iter().map(|slide| slide.index).collect();

    let envelope = Envelope::success(matrix)
        .with_entity_type(EntityType::Matrix)
        .with_count(indices.len())
        .with_duration_ms(elapsed_ms(start));

    emit(json, envelope, |matrix| {
        let header: Vec<String> = indices.iter().map(|i| format!("{i:>6}")).collect();
        println!("      {}", header.join(""));
        for (index, row) in indices.iter().zip(matrix) {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>6.2}")).collect();
            println!("{index:>6}{}", cells.join(""));
        }
    })
}
