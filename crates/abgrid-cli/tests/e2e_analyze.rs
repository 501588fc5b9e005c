//! E2E tests for `abgrid analyze`.
//!
//! Each test writes group files into an isolated temp directory and runs the
//! binary as a subprocess.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

fn abgrid_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("abgrid"));
    cmd.current_dir(dir);
    cmd.env("ABGRID_LOG", "error");
    cmd
}

fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("write fixture");
    path
}

const GROUP_1: &str = "\
group: 1
choices_a:
  - A: B,C
  - B: A,C
  - C: A
  - D: ~
choices_b:
  - A: D
  - B: D
  - C: D
  - D: A
";

const MISMATCH: &str = "\
group: 2
choices_a:
  - A: B
  - B: C
  - C: A
choices_b:
  - A: B
  - B: D
  - C: A
";

const BAD_LABEL: &str = "\
group: 3
choices_a:
  - A: B
  - b: A
choices_b:
  - A: B
  - B: A
";

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn human_report_for_one_group() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_1.yaml", GROUP_1);

    abgrid_cmd(dir.path())
        .args(["analyze", "group_1.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Group 1 · network A"))
        .stdout(predicate::str::contains("Group 1 · network B"))
        .stdout(predicate::str::contains("reciprocity:"))
        .stdout(predicate::str::contains("Group 1 · relevant participants"));
}

#[test]
fn json_report_is_one_object_per_group() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_1.yaml", GROUP_1);

    let output = abgrid_cmd(dir.path())
        .args(["analyze", "--json", "group_1.yaml"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let json: Value = serde_json::from_str(lines[0]).expect("valid JSON");
    assert_eq!(json["group"], 1);
    assert_eq!(json["a"]["summary"]["node_count"], 4);
    assert_eq!(json["a"]["nodes"]["D"]["degree_status"], "isolated");
    assert_eq!(json["b"]["rankings"]["in_degree_centrality"][0][0], "D");
    assert_eq!(json["relevant_nodes"]["B"][0]["label"], "D");
    assert!(json["rankings_ab"]["pagerank"].is_array());
}

#[test]
fn out_dir_receives_both_sociograms() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_1.yaml", GROUP_1);

    abgrid_cmd(dir.path())
        .args(["analyze", "--out-dir", "svg", "group_1.yaml"])
        .assert()
        .success();

    for name in ["group_1_a.svg", "group_1_b.svg"] {
        let svg = fs::read_to_string(dir.path().join("svg").join(name)).expect(name);
        assert!(svg.starts_with("<svg"), "{name}");
        assert!(svg.trim_end().ends_with("</svg>"), "{name}");
    }
}

#[test]
fn node_mismatch_fails_with_engine_code() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_2.yaml", MISMATCH);

    abgrid_cmd(dir.path())
        .args(["analyze", "group_2.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001"))
        .stderr(predicate::str::contains("only in B: [D]"));
}

#[test]
fn invalid_label_is_reported_with_a_suggestion() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_3.yaml", BAD_LABEL);

    abgrid_cmd(dir.path())
        .args(["analyze", "group_3.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_label"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn failing_group_does_not_stop_the_batch() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_2.yaml", MISMATCH);
    write_file(dir.path(), "group_1.yaml", GROUP_1);

    let output = abgrid_cmd(dir.path())
        .args(["analyze", "--json", "group_2.yaml", "group_1.yaml"])
        .output()
        .expect("run");
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("one report");
    assert_eq!(json["group"], 1);

    let stderr = String::from_utf8(output.stderr).expect("utf8");
    let error: Value = serde_json::from_str(stderr.trim()).expect("one error");
    assert_eq!(error["file"], "group_2.yaml");
    assert_eq!(error["error"]["error_code"], "E1001");
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("tempdir");

    abgrid_cmd(dir.path())
        .args(["analyze", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read nope.yaml"));
}

#[test]
fn config_file_is_applied() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_1.yaml", GROUP_1);
    write_file(dir.path(), "abgrid.toml", "precision = 1\n");

    let output = abgrid_cmd(dir.path())
        .args(["analyze", "--json", "--config", "abgrid.toml", "group_1.yaml"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    // 5 choices out of 12 possible
    let density = json["a"]["summary"]["density"].as_f64().expect("number");
    assert!((density - 0.4).abs() < 1e-12);
}

#[test]
fn broken_config_aborts_the_run() {
    let dir = TempDir::new().expect("tempdir");
    write_file(dir.path(), "group_1.yaml", GROUP_1);
    write_file(dir.path(), "abgrid.toml", "precision = \"three\"\n");

    abgrid_cmd(dir.path())
        .args(["analyze", "--config", "abgrid.toml", "group_1.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("abgrid.toml"));
}
