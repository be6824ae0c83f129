//! CLI integration tests for seedfuzz-cli.
//!
//! These tests run the actual binary and check outputs, exit codes, and
//! file artifacts.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the seedfuzz binary with a clean environment.
fn seedfuzz() -> Command {
    let mut cmd = Command::cargo_bin("seedfuzz").unwrap();
    for key in [
        "SEEDFUZZ_TRIALS",
        "SEEDFUZZ_TIME_BUDGET_SECS",
        "SEEDFUZZ_WORKERS",
        "SEEDFUZZ_RNG_SEED",
        "SEEDFUZZ_MAX_INPUT_LEN",
        "SEEDFUZZ_CRASH_DIR",
        "SEEDFUZZ_STOP_ON_FAILURE",
        "SEEDFUZZ_PLATFORM_CONDITIONAL",
        "SEEDFUZZ_ALT_OS",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_entry(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    seedfuzz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed-corpus fuzz harness"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("test"))
        .stdout(predicate::str::contains("fuzz"))
        .stdout(predicate::str::contains("replay"));
}

#[test]
fn test_version_displays_version() {
    seedfuzz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("seedfuzz"));
}

#[test]
fn test_help_shows_exit_codes() {
    seedfuzz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("65"))
        .stdout(predicate::str::contains("66"));
}

#[test]
fn test_fuzz_help_shows_options() {
    seedfuzz()
        .args(["fuzz", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--trials"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--crash-dir"))
        .stdout(predicate::str::contains("--keep-going"));
}

// ============================================================================
// List and Test Commands
// ============================================================================

#[test]
fn test_list_shows_bundled_tests() {
    seedfuzz()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("sample::value"))
        .stdout(predicate::str::contains("sample::fuzz"))
        .stdout(predicate::str::contains("pkg::value"))
        .stdout(predicate::str::contains("pkg::fuzz"))
        .stdout(predicate::str::contains("3 seeds"));
}

#[test]
fn test_list_json() {
    let output = seedfuzz()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let tests: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let tests = tests.as_array().unwrap();
    assert_eq!(tests.len(), 4);
    assert_eq!(tests[0]["name"], "pkg::fuzz");
    assert_eq!(tests[0]["kind"], "fuzz");
    assert_eq!(tests[0]["seeds"], 3);
    assert!(tests[1]["seeds"].is_null());
}

#[test]
fn test_all_tests_pass() {
    seedfuzz()
        .arg("test")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PASS sample::value"))
        .stdout(predicate::str::contains("4 passed, 0 failed"));
}

#[test]
fn test_filter_and_json_report() {
    let output = seedfuzz()
        .args(["test", "sample", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "sample::fuzz");
    assert_eq!(results[0]["status"], "passed");
    assert_eq!(results[0]["campaign"]["trials"], 3);
}

#[test]
fn test_quiet_prints_nothing() {
    seedfuzz()
        .args(["test", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(not(windows))]
#[test]
fn test_alt_platform_expectation_off_platform_still_passes() {
    seedfuzz()
        .args(["test", "sample::value", "--alt-platform-expectation"])
        .assert()
        .success();
}

#[test]
fn test_failing_test_exits_with_test_failed() {
    seedfuzz()
        .args(["test", "sample::value"])
        .env("SEEDFUZZ_PLATFORM_CONDITIONAL", "1")
        .env("SEEDFUZZ_ALT_OS", std::env::consts::OS)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL sample::value"))
        .stdout(predicate::str::contains("expected 0, got 1"))
        .stdout(predicate::str::contains("0 passed, 1 failed"));
}

// ============================================================================
// Fuzz Command
// ============================================================================

#[test]
fn test_fuzz_campaign_passes() {
    let temp = TempDir::new().unwrap();
    let crashes = temp.path().join("crashes");

    seedfuzz()
        .args(["fuzz", "pkg::fuzz", "--trials", "500", "--workers", "2"])
        .arg("--crash-dir")
        .arg(&crashes)
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS pkg::fuzz"))
        .stdout(predicate::str::contains("503 trials"));

    assert!(!crashes.exists(), "no failing inputs should be written");
}

#[test]
fn test_fuzz_with_extra_corpus_dir() {
    let temp = TempDir::new().unwrap();
    write_entry(
        &temp,
        "extra.json",
        r#"{"format":"seedfuzz-corpus","version":1,"input":"fffe"}"#,
    );

    let output = seedfuzz()
        .args(["fuzz", "sample::fuzz", "--trials", "0", "--format", "json"])
        .arg("--corpus-dir")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["seeds"], 4);
    assert_eq!(report["trials"], 4);
    assert_eq!(report["failures"].as_array().unwrap().len(), 0);
}

#[test]
fn test_fuzz_unknown_test_is_usage_error() {
    seedfuzz()
        .args(["fuzz", "nope::fuzz", "--trials", "1"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Unknown test"));
}

#[test]
fn test_fuzz_unit_test_is_usage_error() {
    seedfuzz()
        .args(["fuzz", "pkg::value"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("not a fuzz test"));
}

#[test]
fn test_fuzz_zero_workers_is_usage_error() {
    seedfuzz()
        .args(["fuzz", "pkg::fuzz", "--workers", "0"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("workers"));
}

// ============================================================================
// Replay Command
// ============================================================================

#[test]
fn test_replay_stored_entry() {
    let temp = TempDir::new().unwrap();
    let entry = write_entry(
        &temp,
        "x.json",
        r#"{"format":"seedfuzz-corpus","version":1,"input":"78"}"#,
    );

    seedfuzz()
        .args(["replay", "sample::fuzz"])
        .arg(&entry)
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS sample::fuzz"))
        .stdout(predicate::str::contains("78"));
}

#[test]
fn test_replay_absent_entry_json() {
    let temp = TempDir::new().unwrap();
    let entry = write_entry(
        &temp,
        "absent.json",
        r#"{"format":"seedfuzz-corpus","version":1,"input":null}"#,
    );

    let output = seedfuzz()
        .args(["replay", "pkg::fuzz", "--format", "json"])
        .arg(&entry)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let result: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(result["input"].is_null());
    assert_eq!(result["result"]["outcome"], "completed");
}

#[test]
fn test_replay_missing_file_returns_input_error() {
    seedfuzz()
        .args(["replay", "sample::fuzz", "does_not_exist.json"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read corpus entry"));
}

#[test]
fn test_replay_malformed_entry_returns_data_error() {
    let temp = TempDir::new().unwrap();
    let entry = write_entry(&temp, "bad.json", "not a corpus entry");

    seedfuzz()
        .args(["replay", "sample::fuzz"])
        .arg(&entry)
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Invalid corpus entry"));
}
