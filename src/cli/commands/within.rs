//! Within-deck near-duplicate search.

use std::path::Path;
use std::time::Instant;

use crate::cli::args::RangeArgs;
use crate::compare::find_similar_pairs;
use crate::config::Settings;
use crate::io::{EntityType, Envelope, ExitCode, load_deck};

use super::{elapsed_ms, emit};

pub fn run(
    deck_path: &Path,
    threshold: Option<f64>,
    strict: bool,
    range: &RangeArgs,
    mut settings: Settings,
    json: bool,
) -> anyhow::Result<ExitCode> {
    if let Some(threshold) = threshold {
        settings.similarity.slide_threshold = threshold;
    }
    if strict {
        settings.similarity.text_strict = true;
    }
    range.apply(&mut settings);
    let engine = settings.validate()?;

    let deck = load_deck(deck_path)?;
    let start = Instant::now();
    let slides = deck.skip_leading(engine.comparison.skip_leading());
    let pairs = find_similar_pairs(slides, &engine.similarity);
    crate::log_event!("within", "done", "{} pairs in {}", pairs.len(), deck.source);

    let count = pairs.len();
    let envelope = if pairs.is_empty() {
        Envelope::not_found(pairs, "No similar slides found")
            .with_hint("Lower similarity.slide_threshold or pass --threshold")
    } else {
        Envelope::success(pairs).with_message(format!("Found {count} similar slide pairs"))
    }
    .with_entity_type(EntityType::SlidePairs)
    .with_count(count)
    .with_duration_ms(elapsed_ms(start));

    emit(json, envelope, |pairs| {
        for pair in pairs {
            println!(
                "slide {:>3} ~ slide {:>3}  {:.2}",
                pair.source, pair.target, pair.score
            );
        }
    })
}
