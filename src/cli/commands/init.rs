//! Init and Config commands.

use crate::config::Settings;
use crate::error::ConfigError;
use crate::io::{EntityType, Envelope, ExitCode};

use super::emit;

/// Run init command - create configuration file.
pub fn run_init(force: bool) -> anyhow::Result<ExitCode> {
    let path = Settings::init_config_file(force).map_err(|e| ConfigError::Load(e.to_string()))?;
    crate::log_event!("init", "created", "{}", path.display());
    println!("Created configuration file at: {}", path.display());
    println!("Edit this file to customize your settings.");
    Ok(ExitCode::Success)
}

/// Run config command - display current configuration.
pub fn run_config(settings: &Settings, json: bool) -> anyhow::Result<ExitCode> {
    let envelope = Envelope::success(settings)
        .with_entity_type(EntityType::Settings)
        .with_message("Active configuration");
    let rendered = toml::to_string_pretty(settings)?;

    emit(json, envelope, |_| {
        println!("Current Configuration:");
        println!("{}", "=".repeat(50));
        println!("{rendered}");
    })
}
