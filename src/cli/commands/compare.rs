//! Cross-deck ranked comparison.

use std::path::Path;
use std::time::Instant;

use crate::cli::args::RangeArgs;
use crate::compare::{BandedReport, CrossDeckRanking, ScoreBand, rank_correspondences};
use crate::config::Settings;
use crate::io::{EntityType, Envelope, ExitCode, load_deck};
use crate::matcher::MatchPolicy;

use super::{elapsed_ms, emit};

#[allow(clippy::too_many_arguments)]
pub fn run(
    source_path: &Path,
    target_path: &Path,
    policy: Option<MatchPolicy>,
    threshold: Option<f64>,
    report: bool,
    range: &RangeArgs,
    mut settings: Settings,
    json: bool,
) -> anyhow::Result<ExitCode> {
    if let Some(policy) = policy {
        settings.comparison.policy = policy;
    }
    if let Some(threshold) = threshold {
        settings.comparison.rank_threshold = threshold;
    }
    range.apply(&mut settings);
    let engine = settings.validate()?;
    let options = engine.comparison;

    let source = load_deck(source_path)?;
    let target = load_deck(target_path)?;
    crate::debug_event!(
        "compare",
        "options",
        "policy={} threshold={} skip={}",
        options.policy(),
        options.rank_threshold(),
        options.skip_leading()
    );

    let start = Instant::now();
    let matcher = options.matcher(engine.similarity);
    let ranking = rank_correspondences(
        source.skip_leading(options.skip_leading()),
        target.skip_leading(options.skip_leading()),
        matcher.as_ref(),
        options.rank_threshold(),
    );
    let count = ranking.correspondences().count();
    crate::log_event!(
        "compare",
        "done",
        "{count} correspondences between {} and {}",
        source.source,
        target.source
    );

    if report {
        let banded = BandedReport::from_ranking(&ranking, &engine.bands);
        let envelope = wrap(banded, count)
            .with_entity_type(EntityType::Report)
            .with_duration_ms(elapsed_ms(start));
        return emit(json, envelope, print_report);
    }

    let envelope = wrap(ranking, count)
        .with_entity_type(EntityType::Ranking)
        .with_duration_ms(elapsed_ms(start));
    emit(json, envelope, print_ranking)
}

/// Success envelope, or not-found when nothing matched.
fn wrap<T>(data: T, count: usize) -> Envelope<T> {
    let envelope = if count == 0 {
        Envelope::not_found(data, "No similar slides found")
            .with_hint("Lower comparison.rank_threshold or pass --threshold")
    } else {
        Envelope::success(data).with_message(format!("Found {count} correspondences"))
    };
    envelope.with_count(count)
}

fn print_ranking(ranking: &CrossDeckRanking) {
    for slide in &ranking.forward {
        println!("slide {:>3}  {}", slide.index, slide.title.as_deref().unwrap_or(""));
        if slide.is_unmatched() {
            println!("      no similar slide found");
        }
        for candidate in &slide.candidates {
            println!("      -> slide {:>3}  {:.2}", candidate.index, candidate.score);
        }
    }
}

fn print_report(report: &BandedReport) {
    for band in [ScoreBand::Identical, ScoreBand::Strong, ScoreBand::Moderate] {
        let entries = report.entries(band);
        println!("{band} ({})", entries.len());
        for entry in entries {
            println!(
                "  slide {:>3} -> slide {:>3}  {:.2}",
                entry.source, entry.target, entry.score
            );
        }
    }
    println!("unmatched ({})", report.unmatched.len());
    for index in &report.unmatched {
        println!("  slide {index:>3}");
    }
}
