//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::settings::Settings;
use crate::domain::validate::DirectoryStatus;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
    /// Run a program with stdin piped from `stdin`.
    async fn run_with_stdin(&self, program: &str, args: &[&str], stdin: &[u8]) -> Result<Output>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Checks a home directory before it is handed to `pure-pw`.
pub trait DirectoryInspector {
    /// Report whether `path` exists and is a readable, writable directory.
    fn inspect(&self, path: &Path) -> DirectoryStatus;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts settings persistence.
pub trait ConfigStore {
    /// Load settings, falling back to defaults when no file exists.
    fn load(&self) -> Result<Settings>;
    /// Persist settings.
    fn save(&self, settings: &Settings) -> Result<()>;
    /// Location of the settings file.
    fn path(&self) -> Result<PathBuf>;
}
