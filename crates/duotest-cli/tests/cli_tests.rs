//! CLI integration tests
//!
//! Runs the `duotest` binary and checks the stable report lines, flag and
//! configuration handling, and the exit status.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn duotest_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("duotest").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DUOTEST_COLOR")
        .env_remove("DUOTEST_PROGRESS")
        .env("NO_COLOR", "1");
    cmd
}

// ══════════════════════════════════════════════════════════════════════════════
// GROUPS
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_all_groups_pass() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Running add..."))
        .stdout(predicate::str::contains("PASSED: using_verify"))
        .stdout(predicate::str::contains("PASSED: Fixture::add"))
        .stdout(predicate::str::contains("PASSED: complex"))
        .stdout(predicate::str::contains("SUMMARY: Ran 3 tests. 0 failed."))
        .stdout(predicate::str::contains("SUMMARY: Ran 2 tests. 0 failed."))
        .stdout(predicate::str::contains("FAILED").not());
}

#[test]
fn test_plain_group_report() {
    let dir = TempDir::new().unwrap();
    let output = duotest_cmd(&dir).arg("plain").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Running add...",
            "PASSED: add",
            "Running takes_a_sec...",
            "PASSED: takes_a_sec",
            "Running using_verify...",
            "PASSED: using_verify",
            "",
            "SUMMARY: Ran 3 tests. 0 failed.",
        ]
    );
}

#[test]
fn test_shared_group_reports_once() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .arg("shared")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUMMARY: Ran 2 tests. 0 failed."))
        .stdout(predicate::str::contains("SUMMARY").count(1));
}

#[test]
fn test_const_group_has_no_summary() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .arg("const")
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSED: add"))
        .stdout(predicate::str::contains("PASSED: Fixture::add"))
        .stdout(predicate::str::contains("SUMMARY").not());
}

#[test]
fn test_unknown_group_rejected() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .arg("parallel")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ══════════════════════════════════════════════════════════════════════════════
// FLAGS AND CONFIGURATION
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_piped_output_is_plain_without_no_color() {
    let dir = TempDir::new().unwrap();
    let output = duotest_cmd(&dir)
        .env_remove("NO_COLOR")
        .arg("plain")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().any(|line| line == "PASSED: add"));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_color_always_forces_escape_codes() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .env("DUOTEST_COLOR", "always")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}["));
}

#[test]
fn test_quiet_hides_progress() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .args(["--quiet", "plain", "const"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Running").not())
        .stdout(predicate::str::contains("PASSED: add"));
}

#[test]
fn test_config_file_disables_progress() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("duotest.toml"),
        "[output]\nprogress = false\n",
    )
    .unwrap();

    duotest_cmd(&dir)
        .arg("fixture")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running").not());
}

#[test]
fn test_env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("duotest.toml"),
        "[output]\nprogress = false\n",
    )
    .unwrap();

    duotest_cmd(&dir)
        .arg("fixture")
        .env("DUOTEST_PROGRESS", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running Fixture::add..."));
}

#[test]
fn test_report_on_drop_disabled() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("duotest.toml"), "[report]\non_drop = false\n").unwrap();

    duotest_cmd(&dir)
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUMMARY").not());
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quiet.toml");
    fs::write(&path, "[output]\nprogress = false\n").unwrap();

    duotest_cmd(&dir)
        .arg("--config")
        .arg(&path)
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Running").not());
}

#[test]
fn test_missing_config_path_fails() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .args(["--config", "nowhere.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load nowhere.toml"));
}

#[test]
fn test_invalid_config_reports_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("duotest.toml"), "[output]\ncolour = true\n").unwrap();

    duotest_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duotest.toml"));
}

#[test]
fn test_invalid_env_value() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .env("DUOTEST_COLOR", "sometimes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DUOTEST_COLOR"));
}

#[test]
fn test_help_lists_groups_and_env() {
    let dir = TempDir::new().unwrap();
    duotest_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plain"))
        .stdout(predicate::str::contains("const"))
        .stdout(predicate::str::contains("DUOTEST_PROGRESS"));
}
