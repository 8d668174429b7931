//! Application service — running `pure-pw` subcommands.
//!
//! Every invocation goes through [`PurePw::perform`]: build the argument list
//! from settings, run the binary through the `CommandRunner` port, and turn a
//! non-empty stderr into `PureFtpdError::Command`.

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;
use crate::domain::command::{PurePwCommand, password_input};
use crate::domain::error::PureFtpdError;
use crate::domain::settings::Settings;

/// `pure-pw` driver bound to a runner and a settings snapshot.
pub struct PurePw<R> {
    runner: R,
    settings: Settings,
}

impl<R: CommandRunner> PurePw<R> {
    #[must_use]
    pub fn new(runner: R, settings: Settings) -> Self {
        Self { runner, settings }
    }

    /// Run `command`, optionally feeding `stdin`, and return its stdout.
    ///
    /// # Errors
    ///
    /// Returns `PureFtpdError::Command` when `pure-pw` writes anything to
    /// stderr, `PureFtpdError::ExitStatus` when it exits non-zero silently,
    /// and a contextual error when the process cannot be run at all.
    pub async fn perform(&self, command: &PurePwCommand, stdin: Option<&[u8]>) -> Result<String> {
        let args = command.args(&self.settings);
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let command_line = command.command_line(&self.settings);
        tracing::debug!(command = %command_line, stdin = stdin.is_some(), "running pure-pw");

        let output = match stdin {
            Some(input) => {
                self.runner
                    .run_with_stdin(&self.settings.binary, &argv, input)
                    .await
            }
            None => self.runner.run(&self.settings.binary, &argv).await,
        }
        .with_context(|| format!("failed to run {command_line}"))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            tracing::debug!(
                command = %command_line,
                status = %output.status,
                stderr_len = stderr.len(),
                "pure-pw reported an error"
            );
            return Err(PureFtpdError::Command {
                command: command_line,
                stderr: stderr.into_owned(),
            }
            .into());
        }
        if !output.status.success() {
            return Err(PureFtpdError::ExitStatus {
                command: command_line,
                status: output.status.to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a command that prompts for a password twice.
    async fn perform_with_password(&self, command: &PurePwCommand, password: &str) -> Result<String> {
        self.perform(command, Some(&password_input(password))).await
    }

    /// `pure-pw useradd`.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is empty or `pure-pw` fails.
    pub async fn add_user(&self, login: &str, password: &str, directory: &str) -> Result<()> {
        require("login", login)?;
        require("password", password)?;
        require("directory", directory)?;
        let command = PurePwCommand::UserAdd {
            login: login.to_string(),
            directory: directory.to_string(),
        };
        self.perform_with_password(&command, password).await?;
        tracing::info!(login, "virtual user added");
        Ok(())
    }

    /// `pure-pw userdel`.
    ///
    /// # Errors
    ///
    /// Returns an error if `login` is empty or `pure-pw` fails.
    pub async fn delete_user(&self, login: &str) -> Result<()> {
        require("login", login)?;
        let command = PurePwCommand::UserDel {
            login: login.to_string(),
        };
        self.perform(&command, None).await?;
        tracing::info!(login, "virtual user deleted");
        Ok(())
    }

    /// `pure-pw passwd`.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is empty or `pure-pw` fails.
    pub async fn change_password(&self, login: &str, password: &str) -> Result<()> {
        require("login", login)?;
        require("password", password)?;
        let command = PurePwCommand::Passwd {
            login: login.to_string(),
        };
        self.perform_with_password(&command, password).await?;
        tracing::info!(login, "password changed");
        Ok(())
    }

    /// `pure-pw usermod -d`.
    ///
    /// # Errors
    ///
    /// Returns an error if any argument is empty or `pure-pw` fails.
    pub async fn change_directory(&self, login: &str, directory: &str) -> Result<()> {
        require("login", login)?;
        require("directory", directory)?;
        let command = PurePwCommand::UserMod {
            login: login.to_string(),
            directory: directory.to_string(),
        };
        self.perform(&command, None).await?;
        tracing::info!(login, directory, "home directory changed");
        Ok(())
    }

    /// `pure-pw show`, returning the raw listing.
    ///
    /// # Errors
    ///
    /// Returns an error if `login` is empty or `pure-pw` fails.
    pub async fn show(&self, login: &str) -> Result<String> {
        require("login", login)?;
        let command = PurePwCommand::Show {
            login: login.to_string(),
        };
        self.perform(&command, None).await
    }
}

fn require(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PureFtpdError::MissingArgument(name).into());
    }
    Ok(())
}
