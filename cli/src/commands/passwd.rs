//! `pureadm passwd <login>` — set a new password.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::ensure_saved;
use crate::domain::error::UserError;

/// Arguments for the passwd command.
#[derive(Args)]
pub struct PasswdArgs {
    /// Login name
    pub login: String,

    /// Read the new password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

/// Run `pureadm passwd`.
///
/// # Errors
///
/// Returns `UserError::NotFound` for unknown logins, or any `pure-pw` failure.
pub async fn run(app: &AppContext, args: PasswdArgs) -> Result<ExitCode> {
    let users = app.users()?;
    let Some(mut user) = users.find_by_login(&args.login).await? else {
        return Err(UserError::NotFound(args.login).into());
    };

    let password = app.read_password(args.password_stdin)?;
    user.set_password(Some(password));
    let outcome = users.save(&mut user).await?;
    ensure_saved(&user)?;
    tracing::debug!(?outcome, "passwd finished");

    app.renderer()
        .render_done(&app.output, "Password changed for", &args.login)?;
    Ok(ExitCode::SUCCESS)
}
