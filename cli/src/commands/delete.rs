//! `pureadm delete <login>` — remove a virtual user.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::error::UserError;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Login name
    pub login: String,
}

/// Run `pureadm delete`.
///
/// # Errors
///
/// Returns `UserError::NotFound` for unknown logins, or any `pure-pw` failure.
pub async fn run(app: &AppContext, args: DeleteArgs) -> Result<ExitCode> {
    let users = app.users()?;
    let Some(mut user) = users.find_by_login(&args.login).await? else {
        return Err(UserError::NotFound(args.login).into());
    };

    if !app.is_json() && !app.output.quiet {
        println!();
        println!("This will remove the FTP account '{}'.", args.login);
        println!("Files in its home directory are left in place.");
        println!();
    }
    if !app.confirm("Continue?", app.non_interactive)? {
        app.output.info("Cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    users.destroy(&mut user).await?;
    app.renderer().render_done(&app.output, "Deleted", &args.login)?;
    Ok(ExitCode::SUCCESS)
}
