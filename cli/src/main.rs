//! pureadm - Manage Pure-FTPd virtual users

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize as _;
use tracing_subscriber::EnvFilter;

use pureadm_cli::cli::Cli;
use pureadm_cli::domain::error::{ConfigError, PureFtpdError, UserError};
use pureadm_cli::output::{OutputContext, json};

/// Env var holding the log filter (`RUST_LOG` syntax).
const LOG_ENV: &str = "PUREADM_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    let ctx = OutputContext::new(cli.no_color, false);
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report(&e, json_mode, &ctx);
            ExitCode::FAILURE
        }
    }
}

fn report(e: &anyhow::Error, json_mode: bool, ctx: &OutputContext) {
    if json_mode {
        match json::format_error(&format!("{e:#}"), error_code(e)) {
            Ok(out) => println!("{out}"),
            Err(_) => eprintln!("Error: {e:#}"),
        }
        return;
    }
    let label = "Error:".style(ctx.styles.error);
    if let Some(UserError::Invalid(errors)) = e.downcast_ref::<UserError>() {
        eprintln!("{label} User is invalid:");
        for message in errors.full_messages() {
            eprintln!("  - {message}");
        }
        return;
    }
    eprintln!("{label} {e:#}");
}

fn error_code(e: &anyhow::Error) -> &'static str {
    if let Some(err) = e.downcast_ref::<UserError>() {
        return match err {
            UserError::Invalid(_) => "invalid",
            UserError::NotFound(_) | UserError::DocumentNotFound => "not_found",
            UserError::UnknownAttribute(_) => "error",
        };
    }
    if e.downcast_ref::<PureFtpdError>().is_some() {
        return "pure_pw";
    }
    if e.downcast_ref::<ConfigError>().is_some() {
        return "config";
    }
    "error"
}
