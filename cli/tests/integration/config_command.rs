//! Integration tests for `pureadm config`.
//!
//! All filesystem-touching tests set `PUREADM_CONFIG` to a temp path so they
//! never read or write `~/.pureadm/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pureadm(config: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("pureadm"));
    cmd.env("NO_COLOR", "1")
        .env("PUREADM_CONFIG", config)
        .env_remove("PUREADM_PASSWORD_FILE");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

// ---------------------------------------------------------------------------
// `pureadm config show`
// ---------------------------------------------------------------------------

#[test]
fn test_config_show_without_file_lists_defaults() {
    let (_dir, path) = temp_config_path();
    pureadm(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pureftpd_user"))
        .stdout(predicate::str::contains("pureftpd_group"))
        .stdout(predicate::str::contains("/etc/pure-ftpd/pureftpd.passwd"))
        .stdout(predicate::str::contains("PUREADM_CONFIG"));
}

#[test]
fn test_config_show_does_not_create_file() {
    let (_dir, path) = temp_config_path();
    pureadm(&path).args(["config", "show"]).assert().success();
    assert!(
        !std::path::Path::new(&path).exists(),
        "show must not create the config file"
    );
}

#[test]
fn test_config_show_json() {
    let (_dir, path) = temp_config_path();
    let assert = pureadm(&path)
        .args(["config", "show", "--json"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["settings"]["sysuser"], "pureftpd_user");
    assert_eq!(value["settings"]["timeout_secs"], 30);
    assert_eq!(value["path"], path.as_str());
}

#[test]
fn test_config_show_applies_password_file_flag() {
    let (_dir, path) = temp_config_path();
    pureadm(&path)
        .args(["--password-file", "/tmp/other.passwd", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/other.passwd"));
}

// ---------------------------------------------------------------------------
// `pureadm config set`
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_persists_value_readable_by_show() {
    let (_dir, path) = temp_config_path();
    pureadm(&path)
        .args(["config", "set", "sysuser", "ftpvirtual"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set sysuser = ftpvirtual"));

    pureadm(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ftpvirtual"));
}

#[cfg(unix)]
#[test]
fn test_config_set_writes_private_file() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, path) = temp_config_path();
    pureadm(&path)
        .args(["config", "set", "timeout_secs", "5"])
        .assert()
        .success();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_config_set_database_file_none_unsets_it() {
    let (_dir, path) = temp_config_path();
    pureadm(&path)
        .args(["config", "set", "database_file", "/tmp/pureftpd.pdb"])
        .assert()
        .success();
    assert!(std::fs::read_to_string(&path).unwrap().contains("/tmp/pureftpd.pdb"));

    pureadm(&path)
        .args(["config", "set", "database_file", "none"])
        .assert()
        .success();
    assert!(!std::fs::read_to_string(&path).unwrap().contains("database_file"));
}

#[test]
fn test_config_set_json_output() {
    let (_dir, path) = temp_config_path();
    let assert = pureadm(&path)
        .args(["--json", "config", "set", "binary", "/usr/sbin/pure-pw"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["key"], "binary");
    assert_eq!(value["value"], "/usr/sbin/pure-pw");
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[test]
fn test_config_set_unknown_key_lists_valid_keys() {
    let (_dir, path) = temp_config_path();
    pureadm(&path)
        .args(["config", "set", "security.level", "strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password_file"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_timeout_fails() {
    let (_dir, path) = temp_config_path();
    pureadm(&path)
        .args(["config", "set", "timeout_secs", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}

#[test]
fn test_config_set_error_json_has_config_code() {
    let (_dir, path) = temp_config_path();
    let assert = pureadm(&path)
        .args(["--json", "config", "set", "nope", "x"])
        .assert()
        .failure();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "config");
}
