//! `pureadm update <login>` — rename a user or move its home directory.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::users::SaveOutcome;
use crate::commands::ensure_saved;
use crate::domain::error::UserError;

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Current login name
    pub login: String,

    /// New login name (the account is recreated; a new password is required)
    #[arg(long, value_name = "LOGIN")]
    pub rename: Option<String>,

    /// New home directory
    #[arg(short, long)]
    pub directory: Option<String>,

    /// Prompt for a new password
    #[arg(long)]
    pub password: bool,

    /// Read the new password from the first line of stdin
    #[arg(long, conflicts_with = "password")]
    pub password_stdin: bool,
}

/// Run `pureadm update`.
///
/// # Errors
///
/// Returns `UserError::NotFound` for unknown logins, `UserError::Invalid`
/// when the changes fail validation, or any `pure-pw` failure.
pub async fn run(app: &AppContext, args: UpdateArgs) -> Result<ExitCode> {
    let users = app.users()?;
    let Some(mut user) = users.find_by_login(&args.login).await? else {
        return Err(UserError::NotFound(args.login).into());
    };

    if let Some(new_login) = args.rename {
        user.set_login(Some(new_login));
    }
    if let Some(directory) = args.directory {
        user.set_directory(Some(directory));
    }
    if args.password || args.password_stdin {
        user.set_password(Some(app.read_password(args.password_stdin)?));
    }

    let outcome = users.save(&mut user).await?;
    ensure_saved(&user)?;

    let login = user.login().unwrap_or(&args.login).to_string();
    if outcome == SaveOutcome::Unchanged {
        app.renderer().render_done(&app.output, "Nothing to change for", &login)?;
    } else {
        app.renderer().render_done(&app.output, "Updated", &login)?;
    }
    Ok(ExitCode::SUCCESS)
}
