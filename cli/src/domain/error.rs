//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::user::ValidationErrors;

/// Marker `pure-pw show` prints on stderr when the login is unknown.
pub const UNKNOWN_USER_MARKER: &str = "Unable to fetch info about user";

// ── pure-pw errors ────────────────────────────────────────────────────────────

/// Errors raised while driving the `pure-pw` binary.
#[derive(Debug, Error)]
pub enum PureFtpdError {
    #[error("Pure-FTPd returned an error:\n{command}\n\n{stderr}")]
    Command { command: String, stderr: String },

    #[error("Pure-FTPd exited with {status}:\n{command}")]
    ExitStatus { command: String, status: String },

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),
}

impl PureFtpdError {
    /// Returns `true` when `pure-pw` reported that the login does not exist.
    #[must_use]
    pub fn is_unknown_user(&self) -> bool {
        matches!(self, Self::Command { stderr, .. } if stderr.contains(UNKNOWN_USER_MARKER))
    }
}

// ── User record errors ────────────────────────────────────────────────────────

/// Errors related to the virtual user record.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found.")]
    DocumentNotFound,

    #[error("User '{0}' not found.")]
    NotFound(String),

    #[error("Unknown attribute: {0}\n\nValid attributes: login, password, directory")]
    UnknownAttribute(String),

    #[error("User is invalid: {0}")]
    Invalid(ValidationErrors),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to settings key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
