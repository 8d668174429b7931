//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Manage Pure-FTPd virtual users
#[derive(Parser)]
#[command(
    name = "pureadm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honoured through `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Passwd file to operate on, overriding the configured one
    #[arg(long, global = true, env = "PUREADM_PASSWORD_FILE", value_name = "PATH")]
    pub password_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a virtual user
    Add(commands::add::AddArgs),

    /// Show a virtual user
    Show(commands::show::ShowArgs),

    /// Delete a virtual user
    Delete(commands::delete::DeleteArgs),

    /// Change a virtual user's password
    Passwd(commands::passwd::PasswdArgs),

    /// Rename a virtual user or change its home directory
    Update(commands::update::UpdateArgs),

    /// Manage settings
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            password_file,
            command,
        } = self;

        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes, password_file },
        });

        match command {
            Command::Add(args) => commands::add::run(&app, args).await,
            Command::Show(args) => commands::show::run(&app, args).await,
            Command::Delete(args) => commands::delete::run(&app, args).await,
            Command::Passwd(args) => commands::passwd::run(&app, args).await,
            Command::Update(args) => commands::update::run(&app, args).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
