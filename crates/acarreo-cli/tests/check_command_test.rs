//! Integration tests for the acarreo binary

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

const NOW: &str = "2026-03-10T12:00:00Z";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the binary with an isolated config directory
fn run(config_home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_acarreo"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run acarreo")
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

/// Valid events: exit 0, oldest line allocated, informational trip flagged
#[test]
fn test_check_valid_events() {
    let home = tempdir().unwrap();
    let snapshot = fixture("snapshot.toml");
    let events = fixture("events_valid.toml");
    let output = run(
        &home,
        &[
            "check",
            snapshot.to_str().unwrap(),
            events.to_str().unwrap(),
            "--format",
            "json",
            "--now",
            NOW,
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value = json(&output);
    assert_eq!(value["summary"]["total"], 2);
    assert_eq!(value["summary"]["valid"], 2);
    assert_eq!(value["summary"]["informational"], 1);

    let first = &value["events"][0];
    assert_eq!(first["label"], "AC-001");
    assert_eq!(first["allocation"]["status"], "matched");
    assert_eq!(first["allocation"]["line"]["id"], "L-DAY1");

    // 7 does not fit the 5 left on the oldest line; no fallback to L-DAY3
    let second = &value["events"][1];
    assert_eq!(second["validation"]["is_informational"], true);
    assert_eq!(second["allocation"]["status"], "exceeds_balance");
    assert!(second["allocation"]["line"].is_null());
}

/// Invalid events: exit 1 with the rule errors in the report
#[test]
fn test_check_invalid_events() {
    let home = tempdir().unwrap();
    let snapshot = fixture("snapshot.toml");
    let events = fixture("events_invalid.toml");
    let output = run(
        &home,
        &["check", snapshot.to_str().unwrap(), events.to_str().unwrap(), "--now", NOW],
    );
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Haul Review Report"));
    assert!(stdout.contains("Agua cruda"));
    assert!(stdout.contains("extraction, deposit, or both"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 haul event(s) failed validation"));
}

/// Allocate command follows the same FIFO rule
#[test]
fn test_allocate_command() {
    let home = tempdir().unwrap();
    let snapshot = fixture("snapshot.toml");
    let output = run(
        &home,
        &[
            "allocate",
            snapshot.to_str().unwrap(),
            "--site",
            "OBRA-1",
            "--material",
            "GRAVA",
            "--quantity",
            "4",
            "-f",
            "json",
        ],
    );
    assert!(output.status.success());
    let value = json(&output);
    assert_eq!(value["reason"], "match found");
    assert_eq!(value["requisition"]["id"], "REQ-DAY1");
}

/// Convert command in both directions
#[test]
fn test_convert_command() {
    let home = tempdir().unwrap();
    let output = run(&home, &["convert", "-c", "10", "-p", "50", "-f", "json"]);
    assert!(output.status.success());
    assert_eq!(json(&output)["quantity"], 5.0);

    let output = run(&home, &["convert", "-c", "10", "-q", "5", "-f", "json"]);
    assert!(output.status.success());
    assert_eq!(json(&output)["percentage"], 50.0);
}

/// Config changes persist and affect later runs
#[test]
fn test_config_set_and_show() {
    let home = tempdir().unwrap();
    let output = run(&home, &["config", "--set", "output_format=json", "--set", "max_age_hours=48"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let output = run(&home, &["config", "--show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Output format:     json"));
    assert!(stdout.contains("Max age (hours):   48"));

    let output = run(&home, &["config", "--set", "colour=blue"]);
    assert!(!output.status.success());
}

/// Missing snapshot file is reported as an error
#[test]
fn test_missing_snapshot() {
    let home = tempdir().unwrap();
    let events = fixture("events_valid.toml");
    let output = run(&home, &["check", "missing.toml", events.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
}
