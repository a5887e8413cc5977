//! Integration tests for the `akuvox` CLI binary.
//!
//! Runs against temporary store files; never touches the user's real
//! configuration.
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `akuvox` binary with env isolation.
fn akuvox_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("akuvox");
    cmd.env("HOME", "/tmp/akuvox-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/akuvox-cli-test-nonexistent")
        .env_remove("AKUVOX_CONFIG")
        .env_remove("AKUVOX_STORE")
        .env_remove("AKUVOX_OUTPUT")
        .env_remove("AKUVOX_POLL_INTERVAL_SECS")
        .env_remove("AKUVOX_SHUTDOWN_GRACE_SECS")
        .env_remove("AKUVOX_STORE_PATH")
        .env_remove("RUST_LOG");
    cmd
}

fn write_store(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("akuvox_data");
    let doc = json!({
        "version": 1,
        "key": "akuvox_data",
        "data": {
            "door_keys_data": [
                {
                    "key_id": "1001",
                    "description": "Cleaner",
                    "key_code": "482913",
                    "begin_time": "01-01-2024 00:00:00",
                    "end_time": "31-12-2099 23:59:59",
                    "allowed_times": 10,
                    "access_times": 3,
                    "qr_code_url": "https://example.invalid/qr/1001"
                },
                {
                    "key_id": "1002",
                    "description": "Plumber",
                    "key_code": "111222",
                    "begin_time": "2020-01-01 08:00:00",
                    "end_time": "2020-01-02 08:00:00",
                    "allowed_times": 1,
                    "access_times": 1,
                    "qr_code_url": "https://example.invalid/qr/1002"
                },
                {
                    "key_id": "1003",
                    "description": "Broken",
                    "key_code": "000000",
                    "begin_time": "not-a-date",
                    "end_time": "2024-03-20 18:00:00",
                    "allowed_times": 1,
                    "access_times": 0,
                    "qr_code_url": ""
                }
            ]
        }
    });
    std::fs::write(&path, doc.to_string()).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = akuvox_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    akuvox_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("keys")
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_completions_bash() {
    akuvox_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("akuvox"));
}

// ── keys ────────────────────────────────────────────────────────────

#[test]
fn test_keys_json_skips_unparseable_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = write_store(&dir);

    let output = akuvox_cmd()
        .arg("keys")
        .arg("--store")
        .arg(&store)
        .args(["-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let keys: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys = keys.as_array().unwrap();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0]["name"], "Cleaner 1001");
    assert_eq!(keys[0]["enabled"], true);
    assert_eq!(keys[0]["expired"], false);
    assert_eq!(keys[1]["name"], "Plumber 1002");
    assert_eq!(keys[1]["expired"], true);
}

#[test]
fn test_keys_active_plain() {
    let dir = tempfile::tempdir().unwrap();
    let store = write_store(&dir);

    akuvox_cmd()
        .arg("keys")
        .arg("--active")
        .args(["-o", "plain"])
        .env("AKUVOX_STORE", &store)
        .assert()
        .success()
        .stdout("Cleaner 1001\n");
}

#[test]
fn test_keys_at_instant() {
    let dir = tempfile::tempdir().unwrap();
    let store = write_store(&dir);

    akuvox_cmd()
        .arg("keys")
        .arg("--store")
        .arg(&store)
        .args(["--active", "--at", "2020-01-01 12:00:00", "-o", "plain"])
        .assert()
        .success()
        .stdout("Plumber 1002\n");
}

#[test]
fn test_keys_table() {
    let dir = tempfile::tempdir().unwrap();
    let store = write_store(&dir);

    akuvox_cmd()
        .arg("keys")
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Cleaner 1001")
                .and(predicate::str::contains("3/10"))
                .and(predicate::str::contains("Broken").not()),
        );
}

#[test]
fn test_keys_without_store_fails() {
    akuvox_cmd()
        .arg("keys")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No door key store configured"));
}

#[test]
fn test_keys_missing_store_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    akuvox_cmd()
        .arg("keys")
        .arg("--store")
        .arg(dir.path().join("missing"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Could not read door key store"));
}

// ── config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    akuvox_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("poll_interval_secs = 300")
                .and(predicate::str::contains("shutdown_grace_secs = 10")),
        );
}

#[test]
fn test_config_file_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "poll_interval_secs = 60\n").unwrap();

    akuvox_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("poll_interval_secs = 60"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "poll_interval_secs = 0\n").unwrap();

    akuvox_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .code(3);
}

// ── watch ───────────────────────────────────────────────────────────

#[test]
fn test_watch_rejects_zero_interval() {
    let dir = tempfile::tempdir().unwrap();
    let store = write_store(&dir);

    akuvox_cmd()
        .arg("watch")
        .arg("--store")
        .arg(&store)
        .args(["--interval", "0"])
        .assert()
        .code(2);
}
