//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is built once in `Cli::run()` from the global flags and hands
//! out the output helpers, the settings store, and a ready-to-use
//! `UserRepository`.

use std::io::BufRead;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::services::config_service;
use crate::application::services::pure_pw::PurePw;
use crate::application::services::users::UserRepository;
use crate::domain::settings::Settings;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::fs::LocalFs;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Repository wired to the production runner and filesystem.
pub type Users = UserRepository<TokioCommandRunner, LocalFs>;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `PUREADM_YES` env vars).
    pub yes: bool,
    /// Use this passwd file instead of the configured one.
    pub password_file: Option<String>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Settings persistence.
    pub config_store: YamlConfigStore,
    /// One-off passwd file override from `--password-file`.
    pub password_file: Option<String>,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `PUREADM_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("PUREADM_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store: YamlConfigStore::new(),
            password_file: flags.behaviour.password_file,
            non_interactive,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Settings for this invocation: the stored file plus `--password-file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or the override is invalid.
    pub fn settings(&self) -> Result<Settings> {
        config_service::effective_settings(&self.config_store, self.password_file.as_deref())
    }

    /// Build the user repository for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded.
    pub fn users(&self) -> Result<Users> {
        let settings = self.settings()?;
        let runner = TokioCommandRunner::new(Duration::from_secs(settings.timeout_secs));
        Ok(UserRepository::new(PurePw::new(runner, settings), LocalFs))
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `PUREADM_YES` env),
    /// returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }

    /// Obtain a new password, either from the first line of stdin or from an
    /// interactive prompt with confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is empty, or if prompting is impossible
    /// because the session is non-interactive.
    pub fn read_password(&self, from_stdin: bool) -> Result<String> {
        if from_stdin {
            return read_password_line(std::io::stdin().lock());
        }
        if self.non_interactive {
            anyhow::bail!("A password is required. Pass it with --password-stdin.");
        }
        let password = dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()
            .context("cannot read password from terminal")?;
        Ok(password)
    }
}

/// First line of `reader`, without the trailing newline.
///
/// # Errors
///
/// Returns an error if reading fails or the line is empty.
pub fn read_password_line(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("cannot read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("No password given on stdin.");
    }
    Ok(password.to_string())
}
