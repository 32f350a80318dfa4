//! CLI argument parsing using clap.
//!
//! Contains the Cli struct and the Commands enum.

use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::config::Settings;
use crate::matcher::MatchPolicy;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Slide similarity matching for presentation decks
#[derive(Parser, Debug)]
#[command(
    name = "deckmatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find similar slides within and across presentation decks",
    long_about = "Score slides by layout, text, image hash and text embedding signals.\nDecks are JSON files produced by an extraction step.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as a JSON envelope
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Index range shared by every comparison command.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Leading slides to skip in each deck (overrides comparison.skip_leading)
    #[arg(long, value_name = "N")]
    pub skip_leading: Option<usize>,
}

impl RangeArgs {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(skip) = self.skip_leading {
            settings.comparison.skip_leading = skip;
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize project
    #[command(about = "Set up .deckmatch directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration settings
    #[command(about = "Display active settings from .deckmatch/settings.toml")]
    Config,

    /// Near-duplicate slides inside one deck
    #[command(
        about = "Find similar slide pairs within one deck",
        after_help = "Examples:\n  deckmatch within deck.json\n  deckmatch within deck.json --threshold 0.9 --strict\n\nJSON paths:\n  .data[].source  .data[].target  .data[].score"
    )]
    Within {
        /// Deck JSON file
        deck: PathBuf,

        /// Minimum slide score (overrides similarity.slide_threshold)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Exact text equality instead of fuzzy ratio
        #[arg(long)]
        strict: bool,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Ranked correspondences from one deck to another
    #[command(
        about = "Rank similar slides across two decks",
        after_help = "Examples:\n  deckmatch compare new.json old.json\n  deckmatch compare new.json old.json --policy exclusive\n  deckmatch compare new.json old.json --skip-leading 1 --report"
    )]
    Compare {
        /// Deck whose slides are looked up
        source: PathBuf,

        /// Deck searched for counterparts
        target: PathBuf,

        /// Element matching policy (overrides comparison.policy)
        #[arg(short, long, value_enum)]
        policy: Option<MatchPolicy>,

        /// Minimum candidate score (overrides comparison.rank_threshold)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Group results into identical/strong/moderate/unmatched bands
        #[arg(long)]
        report: bool,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Image hash and text vector grades across two decks
    #[command(
        about = "Grade slide pairs by image hash distance and text similarity",
        after_help = "Every slide needs \"imagehash\" and \"textvector\".\n\nExamples:\n  deckmatch grade new.json old.json\n  deckmatch grade new.json old.json --json"
    )]
    Grade {
        /// Deck whose slides are looked up
        source: PathBuf,

        /// Deck searched for counterparts
        target: PathBuf,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Slide-to-slide text vector similarity matrix
    #[command(about = "Print the text vector cosine matrix of one deck")]
    Matrix {
        /// Deck JSON file
        deck: PathBuf,

        #[command(flatten)]
        range: RangeArgs,
    },
}
