//! `pureadm add <login> --directory <dir>` — create a virtual user.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::ensure_saved;
use crate::domain::user::Attributes;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Login name (lowercase letters and underscores)
    pub login: String,

    /// Home directory; must exist and be readable and writable
    #[arg(short, long)]
    pub directory: String,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

/// Run `pureadm add`.
///
/// # Errors
///
/// Returns an error if validation fails or `pure-pw useradd` fails.
pub async fn run(app: &AppContext, args: AddArgs) -> Result<ExitCode> {
    let users = app.users()?;
    let password = app.read_password(args.password_stdin)?;

    let user = users
        .create(Attributes::new(&args.login, &password, &args.directory))
        .await?;
    ensure_saved(&user)?;

    app.renderer().render_done(&app.output, "Added", &args.login)?;
    Ok(ExitCode::SUCCESS)
}
