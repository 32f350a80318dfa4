use clap::Parser;

use deckmatch::cli::commands::{self, report_error};
use deckmatch::cli::{Cli, Commands};
use deckmatch::io::ExitCode;
use deckmatch::{ConfigError, Settings, logging};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(code) => code.into(),
        Err(err) => report_error(&err, json).into(),
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    loaded.map_err(|e| ConfigError::Load(e.to_string()))
}

/// Size rayon's global pool before any comparison runs.
fn configure_threads(threads: usize) {
    if threads == 0 {
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        tracing::debug!("thread pool already configured: {e}");
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // A broken settings file must not block `init --force`
    let settings = match (&cli.command, load_settings(&cli)) {
        (Commands::Init { .. }, Err(_)) => Settings::default(),
        (_, loaded) => loaded?,
    };
    logging::init_with_config(&settings.logging);
    configure_threads(settings.comparison.parallel_threads);

    let json = cli.json;
    match cli.command {
        Commands::Init { force } => commands::init::run_init(force),
        Commands::Config => commands::init::run_config(&settings, json),
        Commands::Within {
            deck,
            threshold,
            strict,
            range,
        } => commands::within::run(&deck, threshold, strict, &range, settings, json),
        Commands::Compare {
            source,
            target,
            policy,
            threshold,
            report,
            range,
        } => commands::compare::run(
            &source, &target, policy, threshold, report, &range, settings, json,
        ),
        Commands::Grade {
            source,
            target,
            range,
        } => commands::grade::run(&source, &target, &range, settings, json),
        Commands::Matrix { deck, range } => commands::matrix::run(&deck, &range, settings, json),
    }
}
