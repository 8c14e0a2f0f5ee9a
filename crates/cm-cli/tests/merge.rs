//! Integration tests for the merge command

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn bare_invocation_requires_a_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.json", "[]");

    Command::cargo_bin("cm-merge")
        .unwrap()
        .arg(&a)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn merges_two_files_in_time_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(
        &dir,
        "a.json",
        r#"[{"time":"01:00.00","command":"a","comment":"x"}]"#,
    );
    let b = write_file(
        &dir,
        "b.json",
        r#"[{"time":"00.30.00","command":"b","comment":"y"}]"#,
    );

    let output = Command::cargo_bin("cm-merge")
        .unwrap()
        .arg("merge")
        .args([&a, &b])
        .assert()
        .success()
        .stderr(predicate::str::contains("Processed 2 comments from 2 inputs."))
        .stderr(predicate::str::contains("[ 1, 1, 0, 0, 0, 0 ]"))
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(entries[0]["comment"], "y");
    assert_eq!(entries[1]["comment"], "x");
}

#[test]
fn malformed_file_names_its_slot() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(
        &dir,
        "good.json",
        r#"[{"time":"00:01.00","command":"a","comment":"x"}]"#,
    );
    let bad = write_file(&dir, "bad.json", "{not json");

    Command::cargo_bin("cm-merge")
        .unwrap()
        .arg("merge")
        .args([&good, &bad])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input 2 is not valid JSON"));
}

#[test]
fn rejects_more_than_six_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<_> = (0..7)
        .map(|i| write_file(&dir, &format!("{i}.json"), "[]"))
        .collect();

    Command::cargo_bin("cm-merge")
        .unwrap()
        .arg("merge")
        .args(&paths)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 6"));
}

#[test]
fn remerging_own_output_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(
        &dir,
        "a.json",
        r#"[{"time":"01:00.00","command":"a","comment":"x"},
            {"time":"00:10.00","command":"a","comment":"z"}]"#,
    );
    let b = write_file(
        &dir,
        "b.json",
        r#"[{"time":"00.30.00","command":"b","comment":"y"}]"#,
    );
    let merged = dir.path().join("merged.json");

    Command::cargo_bin("cm-merge")
        .unwrap()
        .arg("merge")
        .args([a.as_os_str(), b.as_os_str()])
        .args(["-o".as_ref(), merged.as_os_str()])
        .arg("--quiet")
        .assert()
        .success();

    let first = fs::read_to_string(&merged).unwrap();

    let output = Command::cargo_bin("cm-merge")
        .unwrap()
        .arg("merge")
        .arg(&merged)
        .arg("--quiet")
        .assert()
        .success()
        .get_output()
        .clone();

    let second = String::from_utf8(output.stdout).unwrap();
    assert_eq!(second.trim_end(), first.trim_end());
}
