//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod command;
pub mod error;
pub mod settings;
pub mod user;
pub mod validate;

pub use command::{PurePwCommand, ShowOutput, parse_show_output, password_input};
pub use error::{ConfigError, PureFtpdError, UserError};
pub use settings::{Settings, validate_settings_key, validate_settings_value};
pub use user::{Attribute, Attributes, Change, User, ValidationErrors};
pub use validate::{DirectoryStatus, validate_attributes};
