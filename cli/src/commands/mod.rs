//! Command implementations

pub mod add;
pub mod config;
pub mod delete;
pub mod passwd;
pub mod show;
pub mod update;
pub mod version;

use anyhow::Result;

use crate::domain::error::UserError;
use crate::domain::user::User;

/// Turn validation failures left on `user` by a save into an error.
///
/// # Errors
///
/// Returns `UserError::Invalid` carrying every message when `user` has errors.
pub fn ensure_saved(user: &User) -> Result<()> {
    if user.errors().is_empty() {
        return Ok(());
    }
    Err(UserError::Invalid(user.errors().clone()).into())
}
