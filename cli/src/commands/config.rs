//! `pureadm config` — show and set settings.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::settings::{validate_settings_key, validate_settings_value};

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current settings
    Show,
    /// Set a setting (use `none` to unset `database_file`)
    Set {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read or written, or the
/// key or value is invalid.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<ExitCode> {
    let settings = app.settings()?;
    let path = app.config_store.path()?;
    app.renderer().render_settings(&settings, &path)?;
    Ok(ExitCode::SUCCESS)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<ExitCode> {
    validate_settings_key(key)?;
    validate_settings_value(key, value)?;

    let settings = config_service::set_value(&app.config_store, key, value)?;
    let stored = settings.get(key).unwrap_or_default();

    app.renderer().render_setting(&app.output, key, &stored)?;
    Ok(ExitCode::SUCCESS)
}
