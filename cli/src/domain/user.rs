//! Virtual FTP user record with change tracking.
//!
//! Pure data — no I/O. Persistence lives in
//! `application::services::users::UserRepository`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::UserError;

/// The three attributes `pure-pw` stores for a virtual user that pureadm manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Login,
    Password,
    Directory,
}

impl Attribute {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Password => "password",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "password" => Ok(Self::Password),
            "directory" => Ok(Self::Directory),
            other => Err(UserError::UnknownAttribute(other.to_string())),
        }
    }
}

/// Plain attribute bag used to build or bulk-assign a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    pub login: Option<String>,
    pub password: Option<String>,
    pub directory: Option<String>,
}

impl Attributes {
    #[must_use]
    pub fn new(login: &str, password: &str, directory: &str) -> Self {
        Self {
            login: Some(login.to_string()),
            password: Some(password.to_string()),
            directory: Some(directory.to_string()),
        }
    }

    fn slot(&self, attr: Attribute) -> &Option<String> {
        match attr {
            Attribute::Login => &self.login,
            Attribute::Password => &self.password,
            Attribute::Directory => &self.directory,
        }
    }

    fn slot_mut(&mut self, attr: Attribute) -> &mut Option<String> {
        match attr {
            Attribute::Login => &mut self.login,
            Attribute::Password => &mut self.password,
            Attribute::Directory => &mut self.directory,
        }
    }
}

/// A single attribute change: value before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub was: Option<String>,
    pub now: Option<String>,
}

/// Validation messages keyed by attribute, in insertion order per attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<Attribute, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, attr: Attribute, message: impl Into<String>) {
        self.0.entry(attr).or_default().push(message.into());
    }

    #[must_use]
    pub fn on(&self, attr: Attribute) -> &[String] {
        self.0.get(&attr).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// `"login has already been taken"` style messages.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(attr, msgs)| msgs.iter().map(move |m| format!("{attr} {m}")))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join("; "))
    }
}

/// Virtual FTP user as seen through `pure-pw`.
///
/// Setters record the value an attribute had before its first change so the
/// repository can decide which `pure-pw` subcommands an update needs.
#[derive(Debug, Clone, Default)]
pub struct User {
    attributes: Attributes,
    original: BTreeMap<Attribute, Option<String>>,
    previous_changes: BTreeMap<Attribute, Change>,
    persisted: bool,
    errors: ValidationErrors,
}

impl User {
    /// Build a new, unsaved record. Every given attribute counts as changed.
    #[must_use]
    pub fn new(attributes: Attributes) -> Self {
        let mut user = Self::default();
        user.set_attributes(attributes);
        user
    }

    /// Build a clean record that mirrors what `pure-pw` has stored.
    #[must_use]
    pub fn loaded(attributes: Attributes) -> Self {
        Self {
            attributes,
            persisted: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn login(&self) -> Option<&str> {
        self.attributes.login.as_deref()
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.attributes.password.as_deref()
    }

    #[must_use]
    pub fn directory(&self) -> Option<&str> {
        self.attributes.directory.as_deref()
    }

    #[must_use]
    pub fn get(&self, attr: Attribute) -> Option<&str> {
        self.attributes.slot(attr).as_deref()
    }

    pub fn set_login(&mut self, value: Option<String>) {
        self.set(Attribute::Login, value);
    }

    pub fn set_password(&mut self, value: Option<String>) {
        self.set(Attribute::Password, value);
    }

    pub fn set_directory(&mut self, value: Option<String>) {
        self.set(Attribute::Directory, value);
    }

    /// Assign `value` and track the change.
    pub fn set(&mut self, attr: Attribute, value: Option<String>) {
        let slot = self.attributes.slot_mut(attr);
        if *slot == value {
            return;
        }
        let old = std::mem::replace(slot, value);
        let reverted = self
            .original
            .get(&attr)
            .map(|was| was == self.attributes.slot(attr));
        match reverted {
            Some(true) => {
                self.original.remove(&attr);
            }
            Some(false) => {}
            None => {
                self.original.insert(attr, old);
            }
        }
    }

    /// Assign by attribute name.
    ///
    /// # Errors
    ///
    /// Returns `UserError::UnknownAttribute` for names other than
    /// `login`, `password` and `directory`.
    pub fn assign(&mut self, key: &str, value: Option<String>) -> Result<(), UserError> {
        let attr = key.parse::<Attribute>()?;
        self.set(attr, value);
        Ok(())
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Assign every attribute present in `attributes`; absent ones are left alone.
    pub fn set_attributes(&mut self, attributes: Attributes) {
        let Attributes {
            login,
            password,
            directory,
        } = attributes;
        for (attr, value) in [
            (Attribute::Login, login),
            (Attribute::Password, password),
            (Attribute::Directory, directory),
        ] {
            if value.is_some() {
                self.set(attr, value);
            }
        }
    }

    #[must_use]
    pub fn changed(&self) -> bool {
        !self.original.is_empty()
    }

    #[must_use]
    pub fn is_changed(&self, attr: Attribute) -> bool {
        self.original.contains_key(&attr)
    }

    #[must_use]
    pub fn changes(&self) -> BTreeMap<Attribute, Change> {
        self.original
            .iter()
            .map(|(attr, was)| {
                (
                    *attr,
                    Change {
                        was: was.clone(),
                        now: self.attributes.slot(*attr).clone(),
                    },
                )
            })
            .collect()
    }

    /// The value an attribute had before it was changed.
    #[must_use]
    pub fn was(&self, attr: Attribute) -> Option<&str> {
        match self.original.get(&attr) {
            Some(was) => was.as_deref(),
            None => self.get(attr),
        }
    }

    #[must_use]
    pub fn login_was(&self) -> Option<&str> {
        self.was(Attribute::Login)
    }

    #[must_use]
    pub fn previous_changes(&self) -> &BTreeMap<Attribute, Change> {
        &self.previous_changes
    }

    #[must_use]
    pub fn persisted(&self) -> bool {
        self.persisted
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub(crate) fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Record a successful save: pending changes become previous changes.
    pub(crate) fn mark_saved(&mut self) {
        self.previous_changes = self.changes();
        self.original.clear();
        self.persisted = true;
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.persisted = false;
    }

    /// Replace attributes with freshly loaded ones and drop all dirty state.
    pub(crate) fn replace_with(&mut self, attributes: Attributes) {
        self.attributes = attributes;
        self.original.clear();
        self.errors.clear();
    }
}
