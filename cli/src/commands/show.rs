//! `pureadm show <login>` — print what `pure-pw` stores for a user.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::error::UserError;

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Login name
    pub login: String,
}

/// Run `pureadm show`.
///
/// # Errors
///
/// Returns `UserError::NotFound` for unknown logins, or any `pure-pw` failure.
pub async fn run(app: &AppContext, args: ShowArgs) -> Result<ExitCode> {
    let users = app.users()?;
    let Some(details) = users.show(&args.login).await? else {
        return Err(UserError::NotFound(args.login).into());
    };
    app.renderer().render_user(&details)?;
    Ok(ExitCode::SUCCESS)
}
