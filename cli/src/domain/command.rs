//! `pure-pw` command construction and output parsing.
//!
//! Pure functions only. Turning a [`PurePwCommand`] into a running process
//! is the job of `application::services::pure_pw`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::settings::Settings;
use crate::domain::user::Attributes;

/// The `pure-pw` subcommands pureadm drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurePwCommand {
    UserAdd { login: String, directory: String },
    UserDel { login: String },
    Passwd { login: String },
    UserMod { login: String, directory: String },
    Show { login: String },
}

impl PurePwCommand {
    #[must_use]
    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::UserAdd { .. } => "useradd",
            Self::UserDel { .. } => "userdel",
            Self::Passwd { .. } => "passwd",
            Self::UserMod { .. } => "usermod",
            Self::Show { .. } => "show",
        }
    }

    #[must_use]
    pub fn login(&self) -> &str {
        match self {
            Self::UserAdd { login, .. }
            | Self::UserDel { login }
            | Self::Passwd { login }
            | Self::UserMod { login, .. }
            | Self::Show { login } => login,
        }
    }

    /// Whether `pure-pw` prompts for a password on stdin.
    #[must_use]
    pub fn reads_password(&self) -> bool {
        matches!(self, Self::UserAdd { .. } | Self::Passwd { .. })
    }

    /// Whether the command rewrites the PureDB file (`-m`).
    #[must_use]
    pub fn commits(&self) -> bool {
        !matches!(self, Self::Show { .. })
    }

    /// Argument list, without the program name.
    #[must_use]
    pub fn args(&self, settings: &Settings) -> Vec<String> {
        let pw_file = settings.password_file.clone();
        let mut args = vec![self.subcommand().to_string(), self.login().to_string()];
        match self {
            Self::UserAdd { directory, .. } => args.extend([
                "-f".to_string(),
                pw_file,
                "-u".to_string(),
                settings.sysuser.clone(),
                "-g".to_string(),
                settings.sysgroup.clone(),
                "-d".to_string(),
                directory.clone(),
            ]),
            Self::UserMod { directory, .. } => args.extend([
                "-d".to_string(),
                directory.clone(),
                "-f".to_string(),
                pw_file,
            ]),
            Self::UserDel { .. } | Self::Passwd { .. } | Self::Show { .. } => {
                args.extend(["-f".to_string(), pw_file]);
            }
        }
        if self.commits() {
            if let Some(db) = &settings.database_file {
                args.extend(["-F".to_string(), db.clone()]);
            }
            args.push("-m".to_string());
        }
        args
    }

    /// Full command line as shown in logs and error messages.
    #[must_use]
    pub fn command_line(&self, settings: &Settings) -> String {
        let mut line = settings.binary.clone();
        for arg in self.args(settings) {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

/// Stdin payload answering both password prompts.
#[must_use]
pub fn password_input(password: &str) -> Vec<u8> {
    format!("{password}\n{password}\n").into_bytes()
}

// ── `pure-pw show` parsing ───────────────────────────────────────────────────

static SHOW_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?im)^[ \t]*(login|password|directory|uid|gid)[ \t]*:[ \t]*(\S.*?)[ \t]*\r?$")
        .expect("valid regex")
});

/// Account details reported by `pure-pw show`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowOutput {
    pub login: Option<String>,
    /// Hashed password as stored in the passwd file.
    pub password: Option<String>,
    pub directory: Option<String>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}

impl ShowOutput {
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        Attributes {
            login: self.login.clone(),
            password: self.password.clone(),
            directory: self.directory.clone(),
        }
    }
}

/// Parse the `Key : value` listing printed by `pure-pw show`.
///
/// `UID`/`GID` lines look like `1001 (ftpuser)`; only the number is kept.
#[must_use]
pub fn parse_show_output(stdout: &str) -> ShowOutput {
    let mut out = ShowOutput::default();
    for caps in SHOW_FIELD_RE.captures_iter(stdout) {
        let value = caps[2].to_string();
        match caps[1].to_ascii_lowercase().as_str() {
            "login" => out.login = Some(value),
            "password" => out.password = Some(value),
            "directory" => out.directory = Some(value),
            "uid" => out.uid = leading_number(&value),
            "gid" => out.gid = leading_number(&value),
            _ => {}
        }
    }
    out
}

fn leading_number(value: &str) -> Option<u32> {
    value.split_whitespace().next()?.parse().ok()
}
