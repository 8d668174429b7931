//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::domain::command::ShowOutput;
use crate::domain::settings::{Settings, VALID_SETTINGS_KEYS};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the details `pure-pw show` reported for one user.
    pub fn render_user(&self, user: &ShowOutput) {
        self.ctx.kv("Login:", user.login.as_deref().unwrap_or("-"));
        self.ctx.kv("Directory:", user.directory.as_deref().unwrap_or("-"));
        self.ctx.kv("UID:", &optional_id(user.uid));
        self.ctx.kv("GID:", &optional_id(user.gid));
        self.ctx.kv("Password:", user.password.as_deref().unwrap_or("-"));
    }

    /// Render the current settings.
    pub fn render_settings(&self, settings: &Settings, path: &std::path::Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for key in VALID_SETTINGS_KEYS {
            let value = settings.get(key).unwrap_or_default();
            println!("  {:<20} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["PUREADM_CONFIG", "PUREADM_PASSWORD_FILE", "NO_COLOR"] {
            println!(
                "    {:<24} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
    }
}

fn optional_id(id: Option<u32>) -> String {
    id.map_or_else(|| "-".to_string(), |n| n.to_string())
}
