//! End-to-end integration tests for the `bealhunt` binary.
//!
//! Exercises the compiled binary with `assert_cmd`: CLI parsing -> table
//! build -> sieve -> verify -> JSONL logging -> exit code. Small rectangles
//! keep these fast while still covering the full pipeline, the way the
//! grounding codebase's `cli_tests.rs` spawns its binary rather than only
//! unit-testing its internals.

use std::io::BufRead;

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn bealhunt() -> Command {
    Command::cargo_bin("bealhunt").unwrap()
}

fn temp_log_path(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "bealhunt-integration-{tag}-{}.jsonl",
        std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos()
    ))
}

#[test]
fn help_lists_required_flags() {
    bealhunt().arg("--help").assert().success().stdout(
        predicate::str::contains("--x")
            .and(predicate::str::contains("--y"))
            .and(predicate::str::contains("--z"))
            .and(predicate::str::contains("--amax"))
            .and(predicate::str::contains("--bmax"))
            .and(predicate::str::contains("--validate")),
    );
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    bealhunt().args(["--y", "4", "--z", "5", "--amax", "10", "--bmax", "10"]).assert().failure();
}

#[test]
fn invalid_exponent_exits_nonzero_nonforty_two() {
    let log = temp_log_path("invalid-exp");
    let assert = bealhunt()
        .args(["--x", "2", "--y", "4", "--z", "5", "--amax", "10", "--bmax", "10", "--log"])
        .arg(&log)
        .assert();
    let code = assert.get_output().status.code().unwrap();
    assert_ne!(code, 0);
    assert_ne!(code, 42);
    let _ = std::fs::remove_file(&log);
}

#[test]
fn s5_small_rectangle_reports_expected_totals_and_exit_code() {
    let log = temp_log_path("s5");
    bealhunt()
        .args(["--x", "3", "--y", "4", "--z", "5", "--amax", "100", "--bmax", "100", "--log"])
        .arg(&log)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("status=CLEAR")
                .and(predicate::str::contains("total_pairs=10000"))
                .and(predicate::str::contains("primitive_hits=0")),
        );
    let _ = std::fs::remove_file(&log);
}

#[test]
fn jsonl_log_contains_start_and_complete_records_in_order() {
    let log = temp_log_path("jsonl-shape");
    bealhunt()
        .args(["--x", "3", "--y", "4", "--z", "5", "--amax", "50", "--bmax", "50", "--log"])
        .arg(&log)
        .assert()
        .success();

    let reader = std::io::BufReader::new(std::fs::File::open(&log).unwrap());
    let lines: Vec<serde_json::Value> = reader
        .lines()
        .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
        .collect();

    assert!(lines.len() >= 2, "expected at least START and COMPLETE records");
    assert_eq!(lines.first().unwrap()["event"], "START");
    assert_eq!(lines.last().unwrap()["event"], "COMPLETE");
    assert_eq!(lines.last().unwrap()["results"]["total_pairs"], 2500);

    let _ = std::fs::remove_file(&log);
}

#[test]
fn validate_flag_runs_self_test_and_exits_clean() {
    bealhunt().arg("--validate").assert().success().stdout(predicate::str::contains("all 7 checks passed"));
}

#[test]
fn astart_bstart_narrow_the_rectangle() {
    let log = temp_log_path("narrowed");
    bealhunt()
        .args([
            "--x", "3", "--y", "4", "--z", "5", "--astart", "51", "--amax", "100", "--bstart", "51", "--bmax", "100",
            "--log",
        ])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("total_pairs=2500"));
    let _ = std::fs::remove_file(&log);
}
