//! CLI and basic command tests

mod common;

use common::{setup_cohort, sternum, write_file};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    sternum()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sternum width"));
}

#[test]
fn test_version_displays() {
    sternum()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sternum"));
}

#[test]
fn test_unknown_command_fails() {
    sternum()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    sternum()
        .current_dir(tmp.path())
        .args(["stats", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_writes_default_config() {
    let tmp = TempDir::new().unwrap();

    sternum()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote configuration"));

    let written = fs::read_to_string(tmp.path().join("sternum.yaml")).unwrap();
    assert!(written.contains("header_row: 2"));
    assert!(written.contains("too_narrow_mm: 4.0"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "sternum.yaml", "analysis:\n  seed: 1\n");

    sternum()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let kept = fs::read_to_string(tmp.path().join("sternum.yaml")).unwrap();
    assert_eq!(kept, "analysis:\n  seed: 1\n");
}

#[test]
fn test_init_force_overwrites() {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp, "sternum.yaml", "analysis:\n  seed: 1\n");

    sternum()
        .current_dir(tmp.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let written = fs::read_to_string(tmp.path().join("sternum.yaml")).unwrap();
    assert!(written.contains("large_range_mm: 8.0"));
}

#[test]
fn test_generated_config_is_picked_up() {
    let (tmp, _) = setup_cohort();
    sternum().current_dir(tmp.path()).arg("init").assert().success();

    sternum()
        .current_dir(tmp.path())
        .args(["stats", "cohort.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6.22"));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_local_config_changes_thresholds() {
    let (tmp, _) = setup_cohort();
    write_file(&tmp, "sternum.yaml", "analysis:\n  too_narrow_mm: 3.6\n");

    sternum()
        .current_dir(tmp.path())
        .args(["anomalies", "cohort.csv", "--kind", "too-narrow", "--count", "-o", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("too-narrow,1"));
}

#[test]
fn test_explicit_config_path() {
    let (tmp, _) = setup_cohort();
    write_file(&tmp, "strict.yaml", "analysis:\n  large_range_mm: 3.0\n");

    sternum()
        .current_dir(tmp.path())
        .args([
            "anomalies",
            "cohort.csv",
            "--kind",
            "large-range",
            "--count",
            "-o",
            "csv",
            "--config",
            "strict.yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("large-range,2"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["stats", "cohort.csv", "--config", "missing.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yaml"));
}

#[test]
fn test_invalid_config_fails() {
    let (tmp, _) = setup_cohort();
    write_file(&tmp, "sternum.yaml", "analysis:\n  alpha: 2\n");

    sternum()
        .current_dir(tmp.path())
        .args(["stats", "cohort.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha"));
}

// ============================================================================
// Output Format Tests
// ============================================================================

#[test]
fn test_unsupported_format_fails() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["stats", "cohort.csv", "-o", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'csv' output is not available"));
}

#[test]
fn test_yaml_output() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["stats", "cohort.csv", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("count: 9"));
}

#[test]
fn test_no_color_output_is_plain() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["analyze", "cohort.csv", "--seed", "3", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

// ============================================================================
// Completions Tests
// ============================================================================

#[test]
fn test_completions_bash() {
    sternum()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sternum"));
}
