//! End-to-end tests for the user commands against a stand-in `pure-pw`.
//!
//! A small shell script plays `pure-pw`: it keeps one file per account and
//! logs every invocation, so the tests can check both what pureadm printed
//! and which subcommands it ran.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_PURE_PW: &str = r#"#!/bin/sh
here="$(dirname "$0")"
db="$here/db"
mkdir -p "$db"
echo "$*" >> "$here/calls.log"
sub="$1"
login="$2"
shift 2
dir=""
while [ $# -gt 0 ]; do
  case "$1" in
    -d) dir="$2"; shift 2 ;;
    -f|-u|-g|-F) shift 2 ;;
    *) shift ;;
  esac
done
case "$sub" in
  show)
    if [ ! -f "$db/$login" ]; then
      echo "Unable to fetch info about user [$login]" >&2
      exit 1
    fi
    printf 'Login              : %s\nPassword           : %s\nUID                : 1001 (pureftpd_user)\nGID                : 1002 (pureftpd_group)\nDirectory          : %s/./\n' \
      "$login" "$(sed -n 1p "$db/$login")" "$(sed -n 2p "$db/$login")"
    ;;
  useradd)
    if [ -f "$db/$login" ]; then
      echo "Error: that account already exists" >&2
      exit 1
    fi
    read -r pw1
    read -r pw2
    if [ "$pw1" != "$pw2" ]; then
      echo "Error: passwords don't match" >&2
      exit 1
    fi
    printf '$fake$%s\n%s\n' "$pw1" "$dir" > "$db/$login"
    ;;
  userdel)
    if [ ! -f "$db/$login" ]; then
      echo "Error: unable to delete the user" >&2
      exit 1
    fi
    rm "${db:?}/${login:?}"
    ;;
  passwd)
    read -r pw1
    read -r pw2
    old_dir="$(sed -n 2p "$db/$login")"
    printf '$fake$%s\n%s\n' "$pw1" "$old_dir" > "$db/$login"
    ;;
  usermod)
    hash="$(sed -n 1p "$db/$login")"
    printf '%s\n%s\n' "$hash" "$dir" > "$db/$login"
    ;;
esac
"#;

const BROKEN_PURE_PW: &str = "#!/bin/sh\necho 'Error: unable to open the passwd file' >&2\n";

/// Temp workspace holding the stand-in binary, its data, and a settings file.
struct FakeServer {
    dir: TempDir,
    config: String,
}

impl FakeServer {
    fn new() -> Self {
        Self::with_script(FAKE_PURE_PW)
    }

    fn with_script(script: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let binary = dir.path().join("pure-pw");
        std::fs::write(&binary, script).unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::create_dir(dir.path().join("home")).unwrap();

        let config = dir.path().join("config.yaml");
        std::fs::write(
            &config,
            format!(
                "binary: {}\npassword_file: {}\ntimeout_secs: 10\n",
                binary.display(),
                dir.path().join("pureftpd.passwd").display()
            ),
        )
        .unwrap();

        Self {
            dir,
            config: config.to_string_lossy().into_owned(),
        }
    }

    fn home(&self) -> String {
        self.dir.path().join("home").to_string_lossy().into_owned()
    }

    fn make_home(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::create_dir(&path).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn account(&self, login: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join("db").join(login)).ok()
    }

    fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("show "))
            .map(|c| c.split_whitespace().take(2).collect::<Vec<_>>().join(" "))
            .collect()
    }

    fn pureadm(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pureadm"));
        cmd.env("NO_COLOR", "1")
            .env("PUREADM_CONFIG", &self.config)
            .env_remove("PUREADM_PASSWORD_FILE");
        cmd
    }

    fn add(&self, login: &str, password: &str) {
        self.pureadm()
            .args(["add", login, "--directory", &self.home(), "--password-stdin"])
            .write_stdin(format!("{password}\n"))
            .assert()
            .success();
    }
}

fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[test]
fn test_add_creates_account() {
    let server = FakeServer::new();
    server
        .pureadm()
        .args(["add", "bob", "--directory", &server.home(), "--password-stdin"])
        .write_stdin("secret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added bob"));

    let account = server.account("bob").expect("account stored");
    assert!(account.starts_with("$fake$secret\n"));
    assert!(account.contains(&server.home()));
    assert_eq!(server.writes(), ["useradd bob"]);
}

#[test]
fn test_add_passes_settings_to_pure_pw() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    let useradd = server
        .calls()
        .into_iter()
        .find(|c| c.starts_with("useradd"))
        .unwrap();
    assert!(useradd.contains("-u pureftpd_user -g pureftpd_group"));
    assert!(useradd.contains("pureftpd.passwd"));
    assert!(useradd.ends_with(" -m"));
}

#[test]
fn test_add_invalid_login_runs_nothing() {
    let server = FakeServer::new();
    server
        .pureadm()
        .args(["add", "Bob1", "--directory", &server.home(), "--password-stdin"])
        .write_stdin("secret\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("login is invalid"));
    assert!(server.writes().is_empty());
}

#[test]
fn test_add_missing_directory_is_rejected() {
    let server = FakeServer::new();
    let missing = server.dir.path().join("nowhere");
    server
        .pureadm()
        .args([
            "add",
            "bob",
            "--directory",
            &missing.to_string_lossy(),
            "--password-stdin",
        ])
        .write_stdin("secret\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory does not exist"));
    assert!(server.account("bob").is_none());
}

#[test]
fn test_add_existing_login_is_taken() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    server
        .pureadm()
        .args(["add", "bob", "--directory", &server.home(), "--password-stdin"])
        .write_stdin("other\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("login has already been taken"));
}

#[test]
fn test_add_json_invalid_error_code() {
    let server = FakeServer::new();
    let assert = server
        .pureadm()
        .args(["--json", "add", "bob", "--directory", "", "--password-stdin"])
        .write_stdin("secret\n")
        .assert()
        .failure();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["code"], "invalid");
    assert!(
        value["message"]
            .as_str()
            .unwrap()
            .contains("directory can't be blank")
    );
}

#[test]
fn test_add_requires_password_on_stdin() {
    let server = FakeServer::new();
    server
        .pureadm()
        .args(["add", "bob", "--directory", &server.home(), "--password-stdin"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No password"));
    assert!(server.calls().is_empty());
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn test_show_prints_account_details() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    server
        .pureadm()
        .args(["show", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob"))
        .stdout(predicate::str::contains("1001"))
        .stdout(predicate::str::contains(server.home()));
}

#[test]
fn test_show_json() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    let assert = server
        .pureadm()
        .args(["show", "bob", "--json"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["login"], "bob");
    assert_eq!(value["uid"], 1001);
    assert_eq!(value["gid"], 1002);
    assert_eq!(value["password"], "$fake$secret");
}

#[test]
fn test_show_unknown_user_fails() {
    let server = FakeServer::new();
    server
        .pureadm()
        .args(["show", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 'ghost' not found."));
}

#[test]
fn test_show_unknown_user_json_code() {
    let server = FakeServer::new();
    let assert = server
        .pureadm()
        .args(["--json", "show", "ghost"])
        .assert()
        .failure();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["code"], "not_found");
}

// ---------------------------------------------------------------------------
// passwd / update
// ---------------------------------------------------------------------------

#[test]
fn test_passwd_changes_password() {
    let server = FakeServer::new();
    server.add("bob", "old");
    server
        .pureadm()
        .args(["passwd", "bob", "--password-stdin"])
        .write_stdin("new\n")
        .assert()
        .success();

    assert!(server.account("bob").unwrap().starts_with("$fake$new\n"));
    assert_eq!(server.writes(), ["useradd bob", "passwd bob"]);
}

#[test]
fn test_update_directory_runs_usermod() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    let elsewhere = server.make_home("elsewhere");
    server
        .pureadm()
        .args(["update", "bob", "--directory", &elsewhere])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated bob"));

    assert!(server.account("bob").unwrap().contains(&elsewhere));
    assert_eq!(server.writes(), ["useradd bob", "usermod bob"]);
}

#[test]
fn test_update_without_changes_runs_nothing() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    server
        .pureadm()
        .args(["update", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to change"));
    assert_eq!(server.writes(), ["useradd bob"]);
}

#[test]
fn test_update_rename_requires_password() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    server
        .pureadm()
        .args(["update", "bob", "--rename", "robert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "password must be given again to rename",
        ));
    assert!(server.account("bob").is_some());
}

#[test]
fn test_update_rename_recreates_account() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    server
        .pureadm()
        .args(["update", "bob", "--rename", "robert", "--password-stdin"])
        .write_stdin("fresh\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated robert"));

    assert!(server.account("bob").is_none());
    assert!(server.account("robert").unwrap().starts_with("$fake$fresh\n"));
    assert_eq!(
        server.writes(),
        ["useradd bob", "useradd robert", "userdel bob"]
    );
}

#[test]
fn test_update_unknown_user_fails() {
    let server = FakeServer::new();
    server
        .pureadm()
        .args(["update", "ghost", "--directory", &server.home()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 'ghost' not found."));
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[test]
fn test_delete_with_yes_removes_account() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    server
        .pureadm()
        .args(["--yes", "delete", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted bob"));

    assert!(server.account("bob").is_none());
    assert!(path_exists(&server.home()), "home directory is left in place");
}

#[test]
fn test_delete_without_yes_proceeds_in_ci() {
    let server = FakeServer::new();
    server.add("bob", "secret");
    server
        .pureadm()
        .env("CI", "true")
        .args(["delete", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted bob"));
    assert!(server.account("bob").is_none());
}

#[test]
fn test_delete_unknown_user_fails() {
    let server = FakeServer::new();
    server
        .pureadm()
        .args(["--yes", "delete", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    assert!(server.writes().is_empty());
}

// ---------------------------------------------------------------------------
// pure-pw failures
// ---------------------------------------------------------------------------

#[test]
fn test_pure_pw_stderr_is_reported() {
    let server = FakeServer::with_script(BROKEN_PURE_PW);
    server
        .pureadm()
        .args(["show", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Pure-FTPd returned an error"))
        .stderr(predicate::str::contains("unable to open the passwd file"));
}

#[test]
fn test_pure_pw_stderr_json_code() {
    let server = FakeServer::with_script(BROKEN_PURE_PW);
    let assert = server
        .pureadm()
        .args(["--json", "show", "bob"])
        .assert()
        .failure();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["code"], "pure_pw");
}

#[test]
fn test_password_file_flag_reaches_pure_pw() {
    let server = FakeServer::new();
    let other: PathBuf = server.dir.path().join("other.passwd");
    let other = other.to_string_lossy().into_owned();
    server
        .pureadm()
        .args(["--password-file", &other, "show", "bob"])
        .assert()
        .failure();
    assert!(server.calls()[0].contains(&other));
}
