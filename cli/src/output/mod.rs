//! Output formatting module

pub mod human;
pub mod json;
pub mod styles;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
use serde::Serialize;
pub use human::HumanRenderer;
pub use styles::Styles;

use crate::domain::command::ShowOutput;
use crate::domain::settings::Settings;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let use_colors =
            !no_color && Term::stdout().is_term() && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            quiet,
        }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<12} {value}", key.style(self.styles.dim));
        }
    }
}

/// Machine-readable renderer: every payload is one pretty-printed JSON document.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print<T: Serialize>(value: &T) -> Result<()> {
        println!("{}", json::to_pretty(value)?);
        Ok(())
    }
}

/// Renderer selected by the `--json` flag.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render one user's details.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_user(&self, user: &ShowOutput) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_user(user);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(user),
        }
    }

    /// Render the current settings and where they were loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_settings(&self, settings: &Settings, path: &std::path::Path) -> Result<()> {
        match self {
            Self::Human(r) => {
                r.render_settings(settings, path);
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({
                "path": path,
                "settings": settings,
            })),
        }
    }

    /// Report a stored setting.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_setting(&self, ctx: &OutputContext, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Human(_) => {
                ctx.success(&format!("Set {key} = {value}"));
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({
                "key": key,
                "value": value,
            })),
        }
    }

    /// Print the program version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Self::Human(_) => {
                println!("pureadm {version}");
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({ "version": version })),
        }
    }

    /// Report a completed change.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_done(&self, ctx: &OutputContext, action: &str, login: &str) -> Result<()> {
        match self {
            Self::Human(_) => {
                ctx.success(&format!("{action} {login}"));
                Ok(())
            }
            Self::Json(_) => JsonRenderer::print(&serde_json::json!({
                "action": action,
                "login": login,
                "ok": true,
            })),
        }
    }
}
