//! Command implementations for the CLI.
//!
//! Each command loads its decks, validates the effective settings, runs one
//! comparison mode and prints either text or a JSON [`Envelope`].

pub mod compare;
pub mod grade;
pub mod init;
pub mod matrix;
pub mod within;

use serde::Serialize;

use crate::error::{ConfigError, MatchError};
use crate::io::{DeckError, Envelope, ExitCode, ResultCode};

/// Print an envelope as JSON, or render its data as text.
///
/// Returns the exit code matching the envelope's result code.
pub fn emit<T: Serialize>(
    json: bool,
    envelope: Envelope<T>,
    render: impl FnOnce(&T),
) -> anyhow::Result<ExitCode> {
    let code = envelope.code.exit_code();
    if json {
        println!("{}", envelope.to_json()?);
    } else {
        if let Some(data) = &envelope.data {
            render(data);
        }
        if !code.is_success() {
            eprintln!("{}", envelope.message);
        }
    }
    Ok(code)
}

/// Map a command failure onto a result code.
pub fn classify(err: &anyhow::Error) -> ResultCode {
    if err.downcast_ref::<ConfigError>().is_some() {
        ResultCode::ConfigError
    } else if err.downcast_ref::<DeckError>().is_some() {
        ResultCode::InputError
    } else if let Some(err) = err.downcast_ref::<MatchError>() {
        match err {
            MatchError::Config(_) => ResultCode::ConfigError,
            _ => ResultCode::SignalError,
        }
    } else {
        ResultCode::InternalError
    }
}

/// Report a failed command and return its exit code.
pub fn report_error(err: &anyhow::Error, json: bool) -> ExitCode {
    let code = classify(err);
    if json {
        let envelope: Envelope<()> = Envelope::error(code, format!("{err:#}"));
        match envelope.to_json() {
            Ok(text) => println!("{text}"),
            Err(_) => eprintln!("Error: {err:#}"),
        }
    } else {
        eprintln!("Error: {err:#}");
    }
    code.exit_code()
}

fn elapsed_ms(start: std::time::Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
