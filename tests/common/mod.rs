//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a sternum command
///
/// Logging is pinned to `warn` so a developer's `RUST_LOG` cannot leak into
/// assertions on stderr.
pub fn sternum() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("sternum"));
    cmd.env("RUST_LOG", "warn")
        .env_remove("STERNUM_CONFIG")
        .env_remove("STERNUM_SEED");
    cmd
}

/// Ten subjects laid out like the spreadsheet export: a title line, the
/// header on row 2, one inverted row, one large range, two narrow means and
/// one non-numeric cell.
pub const COHORT: &str = "\
Sternum width study export,,,
Patient,b(sternal Thickness)MIN,MAX,Notes
P01,5,7,
P02,6,8,
P03,5.5,7.5,
P04,7,8,
P05,6.5,9.5,
P06,5,3,swapped?
P07,2,12,
P08,3,4,
P09,n/a,6,unreadable
P10,6,7,
";

/// Write a file into the temp directory and return its path
pub fn write_file(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Temp directory holding `cohort.csv`
pub fn setup_cohort() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = write_file(&tmp, "cohort.csv", COHORT);
    (tmp, path)
}

/// Run a command in `tmp` and parse its stdout as JSON
pub fn run_json(tmp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = sternum()
        .current_dir(tmp.path())
        .args(args)
        .args(["-o", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
