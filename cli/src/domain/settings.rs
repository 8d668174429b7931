//! Domain types and validators for pureadm settings.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_SETTINGS_KEYS: &[&str] = &[
    "sysuser",
    "sysgroup",
    "password_file",
    "database_file",
    "binary",
    "timeout_secs",
];

/// Literal accepted by `database_file` to clear the setting.
pub const UNSET_VALUE: &str = "none";

// ── Settings schema ──────────────────────────────────────────────────────────

/// Settings stored in `~/.pureadm/config.yaml` and used to template every
/// `pure-pw` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// System user virtual users are mapped to (`-u`).
    pub sysuser: String,
    /// System group virtual users are mapped to (`-g`).
    pub sysgroup: String,
    /// Path to the `pureftpd.passwd` file (`-f`).
    pub password_file: String,
    /// Optional PureDB output file (`-F`). `pure-pw` uses its own default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_file: Option<String>,
    /// Program to execute.
    pub binary: String,
    /// Per-invocation timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sysuser: "pureftpd_user".to_string(),
            sysgroup: "pureftpd_group".to_string(),
            password_file: "/etc/pure-ftpd/pureftpd.passwd".to_string(),
            database_file: None,
            binary: "pure-pw".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Current value of `key` rendered as a string, `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "sysuser" => self.sysuser.clone(),
            "sysgroup" => self.sysgroup.clone(),
            "password_file" => self.password_file.clone(),
            "database_file" => self
                .database_file
                .clone()
                .unwrap_or_else(|| UNSET_VALUE.to_string()),
            "binary" => self.binary.clone(),
            "timeout_secs" => self.timeout_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Validate and assign `value` to `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_settings_key(key)?;
        validate_settings_value(key, value)?;
        match key {
            "sysuser" => self.sysuser = value.to_string(),
            "sysgroup" => self.sysgroup = value.to_string(),
            "password_file" => self.password_file = value.to_string(),
            "database_file" => {
                self.database_file = (value != UNSET_VALUE).then(|| value.to_string());
            }
            "binary" => self.binary = value.to_string(),
            "timeout_secs" => self.timeout_secs = parse_timeout(value)?,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a settings key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_settings_key(key: &str) -> Result<()> {
    if !VALID_SETTINGS_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_SETTINGS_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a settings value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_settings_value(key: &str, value: &str) -> Result<()> {
    match key {
        "timeout_secs" => {
            parse_timeout(value)?;
        }
        "database_file" if value == UNSET_VALUE => {}
        _ => {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(invalid(
                    key,
                    value,
                    "Value must be non-empty and contain no whitespace.",
                ));
            }
        }
    }
    Ok(())
}

fn parse_timeout(value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(invalid(
            "timeout_secs",
            value,
            "Value must be a positive number of seconds.",
        )),
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
