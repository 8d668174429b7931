//! Pure user validation — no I/O, no async.
//!
//! Rules that need the outside world (login uniqueness, directory checks)
//! run in `application::services::users` through port traits and report
//! back with the messages defined here.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::user::{Attribute, User, ValidationErrors};

/// Logins `pure-pw` accepts through pureadm: lowercase letters and underscores.
pub static LOGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z_]+$").expect("valid regex")
});

pub const BLANK: &str = "can't be blank";
pub const INVALID: &str = "is invalid";
pub const TAKEN: &str = "has already been taken";
pub const RENAME_NEEDS_PASSWORD: &str = "must be given again to rename";

/// Result of inspecting a home directory on the local filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStatus {
    Usable,
    Missing,
    NotADirectory,
    NotReadable,
    NotWritable,
}

impl DirectoryStatus {
    /// Validation message for an unusable directory, `None` when usable.
    #[must_use]
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Usable => None,
            Self::Missing => Some("does not exist"),
            Self::NotADirectory => Some("must be a directory"),
            Self::NotReadable => Some("must be readable"),
            Self::NotWritable => Some("must be writable"),
        }
    }
}

#[must_use]
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[must_use]
pub fn is_valid_login(login: Option<&str>) -> bool {
    login.is_some_and(|l| LOGIN_RE.is_match(l))
}

/// Run the rules that need nothing but the record itself.
#[must_use]
pub fn validate_attributes(user: &User) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if !is_present(user.password()) {
        errors.add(Attribute::Password, BLANK);
    }
    if !is_present(user.directory()) {
        errors.add(Attribute::Directory, BLANK);
    }
    if !is_valid_login(user.login()) {
        errors.add(Attribute::Login, INVALID);
    }

    // A rename recreates the account, and the stored password is only a hash.
    if user.persisted()
        && user.is_changed(Attribute::Login)
        && !user.is_changed(Attribute::Password)
    {
        errors.add(Attribute::Password, RENAME_NEEDS_PASSWORD);
    }

    errors
}
