//! Application service — settings use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::settings::Settings;

/// Load settings and apply a one-off passwd file override.
pub fn effective_settings(
    store: &impl ConfigStore,
    password_file: Option<&str>,
) -> Result<Settings> {
    let mut settings = store.load()?;
    if let Some(path) = password_file {
        settings.set("password_file", path)?;
    }
    Ok(settings)
}

/// Validate `key = value`, then persist it.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<Settings> {
    let mut settings = store.load()?;
    settings.set(key, value)?;
    store.save(&settings)?;
    tracing::info!(key, value, "setting updated");
    Ok(settings)
}
