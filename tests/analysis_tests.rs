//! End-to-end tests of the analysis commands on the reference cohort

mod common;

use common::{run_json, setup_cohort, sternum};
use predicates::prelude::*;

// ============================================================================
// Analyze
// ============================================================================

#[test]
fn test_analyze_text_sections() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["analyze", "cohort.csv", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mean Width Statistics"))
        .stdout(predicate::str::contains("Variability"))
        .stdout(predicate::str::contains("low variability, standard sizing feasible"))
        .stdout(predicate::str::contains("Normality Tests"))
        .stdout(predicate::str::contains("Shapiro-Wilk"))
        .stdout(predicate::str::contains("Data-Entry Anomalies"))
        .stdout(predicate::str::contains("Filtered Mean Widths"))
        .stdout(predicate::str::contains("1 non-numeric width cells"));
}

#[test]
fn test_analyze_json_report() {
    let (tmp, _) = setup_cohort();
    let report = run_json(&tmp, &["analyze", "cohort.csv", "--seed", "42"]);

    assert_eq!(report["rows"], 10);
    assert_eq!(report["valid_rows"], 9);
    assert_eq!(report["coerced_cells"], 1);
    assert_eq!(report["summary"]["count"], 9);
    assert_eq!(report["summary"]["min"], 3.5);
    assert_eq!(report["summary"]["max"], 8.0);
    assert_eq!(report["summary"]["percentiles"]["p50"], 6.5);
    assert_eq!(report["anomalies"]["inverted"]["count"], 1);
    assert_eq!(report["anomalies"]["inverted"]["rows"][0]["line"], 8);
    assert_eq!(report["anomalies"]["large_range"]["count"], 1);
    assert_eq!(report["anomalies"]["too_narrow"]["count"], 2);
    assert_eq!(report["variability"]["verdict"], "low");
    assert_eq!(report["normality"]["seed"], 42);
    assert_eq!(report["filtered"]["rows"], 9);
    assert_eq!(report["charts"]["normal_curve"].as_array().unwrap().len(), 100);
}

#[test]
fn test_analyze_seed_is_reproducible() {
    let (tmp, _) = setup_cohort();
    let a = run_json(&tmp, &["analyze", "cohort.csv", "--seed", "7"]);
    let b = run_json(&tmp, &["analyze", "cohort.csv", "--seed", "7"]);
    assert_eq!(a["normality"], b["normality"]);
}

#[test]
fn test_seed_from_environment() {
    let (tmp, _) = setup_cohort();
    let output = sternum()
        .current_dir(tmp.path())
        .env("STERNUM_SEED", "7")
        .args(["normality", "cohort.csv", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let from_env: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let from_flag = run_json(&tmp, &["normality", "cohort.csv", "--seed", "7"]);
    assert_eq!(from_env["seed"], 7);
    assert_eq!(from_env, from_flag);
}

#[test]
fn test_analyze_range() {
    let (tmp, _) = setup_cohort();
    let report = run_json(&tmp, &["analyze", "cohort.csv", "--range", "6", "7", "--seed", "1"]);
    assert_eq!(report["filtered"]["range"], serde_json::json!([6.0, 7.0]));
    assert_eq!(report["filtered"]["rows"], 5);
    // statistics stay whole-dataset
    assert_eq!(report["summary"]["count"], 9);
}

#[test]
fn test_analyze_inverted_range_fails() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["analyze", "cohort.csv", "--range", "7", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mean-width range"));
}

#[test]
fn test_analyze_histogram_and_rows() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["analyze", "cohort.csv", "--seed", "2", "--histogram", "--show-rows", "--bins", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mean Width Distribution (9 values, 5 bins)"))
        .stdout(predicate::str::contains("SUBJECT"))
        .stdout(predicate::str::contains("row 8"));
}

#[test]
fn test_analyze_markdown() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["analyze", "cohort.csv", "--seed", "5", "-o", "md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Sternum width analysis"));
}

// ============================================================================
// Stats / Normality
// ============================================================================

#[test]
fn test_stats_text() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["stats", "cohort.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Count:"))
        .stdout(predicate::str::contains("6.22"))
        .stdout(predicate::str::contains("50th (median):"));
}

#[test]
fn test_normality_json() {
    let (tmp, _) = setup_cohort();
    let report = run_json(&tmp, &["normality", "cohort.csv", "--seed", "9"]);
    assert_eq!(report["alpha"], 0.05);
    assert_eq!(report["seed"], 9);
    assert_eq!(report["shapiro_wilk"]["test"], "shapiro-wilk");
    assert_eq!(report["kolmogorov_smirnov"]["test"], "kolmogorov-smirnov");
    let p = report["shapiro_wilk"]["p_value"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&p));
}

#[test]
fn test_normality_unseeded_caveat() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["normality", "cohort.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass --seed"));
}

// ============================================================================
// Anomalies
// ============================================================================

#[test]
fn test_anomalies_tables() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["anomalies", "cohort.csv", "--id-column", "Patient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P06"))
        .stdout(predicate::str::contains("P07"))
        .stdout(predicate::str::contains("P08"))
        .stdout(predicate::str::contains("P01").not());
}

#[test]
fn test_anomalies_csv() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["anomalies", "cohort.csv", "--id-column", "Patient", "-o", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "kind,line,subject,min_width,max_width,mean_width,range_width\n",
        ))
        .stdout(predicate::str::contains("inverted,8,P06,5,3,4,-2"))
        .stdout(predicate::str::contains("large-range,9,P07,2,12,7,10"))
        .stdout(predicate::str::contains("too-narrow,10,P08,3,4,3.5,1"));
}

#[test]
fn test_anomalies_count_json() {
    let (tmp, _) = setup_cohort();
    let counts = run_json(&tmp, &["anomalies", "cohort.csv", "--count"]);
    assert_eq!(
        counts,
        serde_json::json!([
            {"kind": "inverted", "count": 1},
            {"kind": "large-range", "count": 1},
            {"kind": "too-narrow", "count": 2}
        ])
    );
}

// ============================================================================
// Filter / Report
// ============================================================================

#[test]
fn test_filter_csv_rows() {
    let (tmp, _) = setup_cohort();
    let output = sternum()
        .current_dir(tmp.path())
        .args(["filter", "cohort.csv", "--min", "6", "--max", "7", "-o", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // header plus five rows
    assert_eq!(stdout.lines().count(), 6);
}

#[test]
fn test_filter_single_bound() {
    let (tmp, _) = setup_cohort();
    let result = run_json(&tmp, &["filter", "cohort.csv", "--min", "7"]);
    assert_eq!(result["view"]["range"], serde_json::json!([7.0, 8.0]));
    assert_eq!(result["view"]["rows"], 4);
}

#[test]
fn test_filter_single_bound_outside_data() {
    let (tmp, _) = setup_cohort();
    let above = run_json(&tmp, &["filter", "cohort.csv", "--min", "9"]);
    assert_eq!(above["view"]["range"], serde_json::json!([9.0, 9.0]));
    assert_eq!(above["view"]["rows"], 0);
    assert_eq!(above["rows"], serde_json::json!([]));

    let below = run_json(&tmp, &["filter", "cohort.csv", "--max", "2"]);
    assert_eq!(below["view"]["range"], serde_json::json!([2.0, 2.0]));
    assert_eq!(below["view"]["rows"], 0);
}

#[test]
fn test_filter_both_bounds_inverted_is_rejected() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["filter", "cohort.csv", "--min", "8", "--max", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mean-width range"));
}

#[test]
fn test_filter_empty_subset_degrades() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["filter", "cohort.csv", "--min", "20", "--max", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 rows"))
        .stdout(predicate::str::contains("No rows inside the range"));
}

#[test]
fn test_report_to_file() {
    let (tmp, _) = setup_cohort();
    sternum()
        .current_dir(tmp.path())
        .args(["report", "cohort.csv", "--seed", "4", "--out", "report.md"])
        .assert()
        .success();

    let md = std::fs::read_to_string(tmp.path().join("report.md")).unwrap();
    assert!(md.contains("### inverted: 1"));
    assert!(md.contains("### too-narrow: 2"));
    assert!(md.contains("seed 4"));
}
