//! Application service — virtual user records backed by `pure-pw`.
//!
//! `UserRepository` maps the record lifecycle onto `pure-pw` subcommands:
//! create → `useradd`, update → `passwd` / `usermod` (or `useradd` + `userdel`
//! for a rename), destroy → `userdel`, lookup → `show`.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{CommandRunner, DirectoryInspector};
use crate::application::services::pure_pw::PurePw;
use crate::domain::command::{ShowOutput, parse_show_output};
use crate::domain::error::{PureFtpdError, UserError};
use crate::domain::user::{Attribute, Attributes, User};
use crate::domain::validate::{self, TAKEN};

/// What `UserRepository::save` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// `useradd` ran for a new record.
    Created,
    /// One or more update subcommands ran.
    Updated,
    /// Valid, but there was nothing to write.
    Unchanged,
    /// Validation failed; see `User::errors`. Nothing was run.
    Invalid,
}

/// Record-mapping layer over `pure-pw`.
pub struct UserRepository<R, D> {
    pure_pw: PurePw<R>,
    directories: D,
}

impl<R: CommandRunner, D: DirectoryInspector> UserRepository<R, D> {
    #[must_use]
    pub fn new(pure_pw: PurePw<R>, directories: D) -> Self {
        Self {
            pure_pw,
            directories,
        }
    }

    #[must_use]
    pub fn pure_pw(&self) -> &PurePw<R> {
        &self.pure_pw
    }

    /// Full `pure-pw show` details, `None` when the login is unknown.
    ///
    /// # Errors
    ///
    /// Propagates any `pure-pw` failure other than "unknown user".
    pub async fn show(&self, login: &str) -> Result<Option<ShowOutput>> {
        match self.pure_pw.show(login).await {
            Ok(stdout) => Ok(Some(parse_show_output(&stdout))),
            Err(e)
                if e.downcast_ref::<PureFtpdError>()
                    .is_some_and(PureFtpdError::is_unknown_user) =>
            {
                tracing::debug!(login, "no such virtual user");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Load the user stored under `login`.
    ///
    /// # Errors
    ///
    /// Propagates any `pure-pw` failure other than "unknown user".
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        Ok(self
            .show(login)
            .await?
            .map(|details| User::loaded(details.attributes())))
    }

    /// Run every validation rule, store the messages on `user`, return validity.
    ///
    /// # Errors
    ///
    /// Returns an error if the uniqueness lookup itself fails.
    pub async fn validate(&self, user: &mut User) -> Result<bool> {
        let mut errors = validate::validate_attributes(user);

        if user.is_changed(Attribute::Login) {
            if let Some(login) = user.login().filter(|l| validate::is_present(Some(*l))) {
                if self.find_by_login(login).await?.is_some() {
                    errors.add(Attribute::Login, TAKEN);
                }
            }
        }

        if user.is_changed(Attribute::Directory) {
            if let Some(dir) = user.directory().filter(|d| validate::is_present(Some(*d))) {
                if let Some(message) = self.directories.inspect(Path::new(dir)).message() {
                    errors.add(Attribute::Directory, message);
                }
            }
        }

        let valid = errors.is_empty();
        if !valid {
            tracing::debug!(errors = %errors, "user failed validation");
        }
        user.set_errors(errors);
        Ok(valid)
    }

    /// Build a record from `attributes` and save it. The record is returned
    /// either way; check `errors()` / `persisted()` to see what happened.
    ///
    /// # Errors
    ///
    /// Returns an error if a `pure-pw` invocation fails.
    pub async fn create(&self, attributes: Attributes) -> Result<User> {
        let mut user = User::new(attributes);
        self.save(&mut user).await?;
        Ok(user)
    }

    /// Validate and write pending changes.
    ///
    /// # Errors
    ///
    /// Returns an error if a `pure-pw` invocation fails.
    pub async fn save(&self, user: &mut User) -> Result<SaveOutcome> {
        if !self.validate(user).await? {
            return Ok(SaveOutcome::Invalid);
        }
        if !user.changed() {
            return Ok(SaveOutcome::Unchanged);
        }

        let outcome = if user.persisted() {
            self.update(user).await?;
            SaveOutcome::Updated
        } else {
            self.insert(user).await?;
            SaveOutcome::Created
        };
        user.mark_saved();
        Ok(outcome)
    }

    /// Delete the stored user. Uses the login as last loaded, so a pending
    /// rename does not redirect the delete.
    ///
    /// Returns `false` without running anything when the record was never
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if `pure-pw userdel` fails.
    pub async fn destroy(&self, user: &mut User) -> Result<bool> {
        let Some(login) = user.login_was().filter(|_| user.persisted()) else {
            return Ok(false);
        };
        self.pure_pw.delete_user(login).await?;
        user.mark_destroyed();
        Ok(true)
    }

    /// Re-read the record from `pure-pw`, discarding unsaved changes.
    ///
    /// # Errors
    ///
    /// Returns `UserError::DocumentNotFound` when the record was never
    /// persisted or no longer exists.
    pub async fn reload(&self, user: &mut User) -> Result<()> {
        let Some(login) = user.login_was().filter(|_| user.persisted()) else {
            return Err(UserError::DocumentNotFound.into());
        };
        let Some(details) = self.show(login).await? else {
            return Err(UserError::DocumentNotFound.into());
        };
        user.replace_with(details.attributes());
        Ok(())
    }

    async fn insert(&self, user: &User) -> Result<()> {
        let (login, password, directory) = required(user)?;
        self.pure_pw.add_user(login, password, directory).await
    }

    async fn update(&self, user: &User) -> Result<()> {
        if user.is_changed(Attribute::Login) {
            let (login, password, directory) = required(user)?;
            let Some(old_login) = user.login_was() else {
                return Err(UserError::DocumentNotFound.into());
            };
            tracing::info!(from = old_login, to = login, "renaming virtual user");
            self.pure_pw.add_user(login, password, directory).await?;
            if let Err(e) = self.pure_pw.delete_user(old_login).await {
                match self.pure_pw.delete_user(login).await {
                    Ok(()) => tracing::warn!(from = old_login, to = login, "rename rolled back"),
                    Err(undo) => tracing::warn!(
                        login,
                        error = %undo,
                        "could not remove new login after a failed rename"
                    ),
                }
                return Err(e);
            }
            return Ok(());
        }

        let login = user.login().unwrap_or_default();
        if user.is_changed(Attribute::Password) {
            self.pure_pw
                .change_password(login, user.password().unwrap_or_default())
                .await?;
        }
        if user.is_changed(Attribute::Directory) {
            self.pure_pw
                .change_directory(login, user.directory().unwrap_or_default())
                .await?;
        }
        Ok(())
    }
}

fn required(user: &User) -> Result<(&str, &str, &str)> {
    match (user.login(), user.password(), user.directory()) {
        (Some(login), Some(password), Some(directory)) => Ok((login, password, directory)),
        _ => Err(UserError::Invalid(user.errors().clone()).into()),
    }
}
