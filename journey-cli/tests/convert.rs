use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const FIXTURE_MARKDOWN: &str = "Morning at the **coffee shop** with *nome one*.\n1. Call back\n2. Buy ~~milk~~ beans> Stay curious.";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn convert_entry_json_to_stdout() {
    let mut cmd = cargo_bin_cmd!("journey2dayone");
    cmd.arg("convert").arg(fixture_path("entry.json"));
    cmd.assert().success().stdout(FIXTURE_MARKDOWN);
}

#[test]
fn convert_raw_markup_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("note.html");
    let output = dir.path().join("note.md");
    fs::write(&input, "<ul class=\"task\"><li data-checked=\"true\">Pack</li><li>Go</li></ul>")
        .unwrap();

    let mut cmd = cargo_bin_cmd!("journey2dayone");
    cmd.arg("convert").arg(&input).arg("-o").arg(&output);
    cmd.assert().success().stdout("");

    assert_eq!(fs::read_to_string(output).unwrap(), "\n- [X] Pack\n- [ ] Go");
}

#[test]
fn convert_missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("journey2dayone");
    cmd.arg("convert").arg("does-not-exist.html");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file 'does-not-exist.html'"));
}

#[test]
fn inspect_stops_after_stage() {
    let mut cmd = cargo_bin_cmd!("journey2dayone");
    cmd.arg("inspect").arg(fixture_path("entry.json")).arg("inline");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("**coffeeshop** with *nome one*."))
        .stdout(predicate::str::contains("<ol><li>Call back</li>"));
}

#[test]
fn inspect_shows_every_stage() {
    let mut cmd = cargo_bin_cmd!("journey2dayone");
    cmd.arg("inspect").arg(fixture_path("entry.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("=== inline ==="))
        .stdout(predicate::str::contains("=== rules ==="))
        .stdout(predicate::str::contains(FIXTURE_MARKDOWN));
}

#[test]
fn inspect_rejects_unknown_stage() {
    let mut cmd = cargo_bin_cmd!("journey2dayone");
    cmd.arg("inspect").arg(fixture_path("entry.json")).arg("tables");
    cmd.assert().failure();
}

#[test]
fn list_stages() {
    let mut cmd = cargo_bin_cmd!("journey2dayone");
    cmd.arg("--list-stages");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("inline"))
        .stdout(predicate::str::contains("phrases"))
        .stdout(predicate::str::contains("rules"));
}
