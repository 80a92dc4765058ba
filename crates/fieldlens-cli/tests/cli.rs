use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fieldlens"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_file(case: &str, file: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join(file)
}

fn sample_dump() -> std::path::PathBuf {
    golden_file("basic", "input.txt")
}

fn sample_fields() -> std::path::PathBuf {
    golden_file("basic", "fields.json")
}

#[test]
fn help_supports_decode_and_parse() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("dump")
        .arg("parse")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.txt");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json() {
    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("-c")
        .arg(sample_fields())
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["report_version"], 1);
    assert_eq!(report["fields"][0]["hex"], "0x2A");
}

#[test]
fn decode_without_config_uses_default_field() {
    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["fields"][0]["name"], "Field 1");
    assert_eq!(report["fields"][0]["range"], "0-3");
}

#[test]
fn stdin_decode_reads_dash_input() {
    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg("-")
        .arg("--stdout")
        .write_stdin("0:ff 1:01 2:00 3:00")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["input"]["path"], "-");
    assert_eq!(report["fields"][0]["value"], "511");
}

#[test]
fn tokenless_input_shows_error_and_hint() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg("-")
        .arg("--stdout")
        .write_stdin("nothing resembling a token\n")
        .assert()
        .failure()
        .stderr(contains("no byte tokens parsed").and(contains("hint:")));
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn stdout_and_table_conflict() {
    cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("--stdout")
        .arg("--table")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_file_contains_rows() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("-c")
        .arg(sample_fields())
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let written = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(value["fields"].as_array().map(Vec::len), Some(3));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn table_renders_decoded_rows() {
    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("-c")
        .arg(sample_fields())
        .arg("--table")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("Name"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("0x2A"));
}

#[test]
fn table_renders_failed_rows() {
    let assert = cmd()
        .arg("dump")
        .arg("decode")
        .arg(golden_file("missing_byte", "input.txt"))
        .arg("-c")
        .arg(golden_file("missing_byte", "fields.json"))
        .arg("--table")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("error: byte 2 missing"));
}

#[test]
fn list_failures_outputs_positions() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(golden_file("missing_byte", "input.txt"))
        .arg("-c")
        .arg(golden_file("missing_byte", "fields.json"))
        .arg("-o")
        .arg(report)
        .arg("--list-failures")
        .assert()
        .success()
        .stderr(contains("Decode failures:").and(contains("field 2 (gap)")));
}

#[test]
fn strict_fails_when_fields_fail() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(golden_file("missing_byte", "input.txt"))
        .arg("-c")
        .arg(golden_file("missing_byte", "fields.json"))
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("field decode failures detected"));
}

#[test]
fn strict_passes_when_all_fields_decode() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("dump")
        .arg("decode")
        .arg(sample_dump())
        .arg("-c")
        .arg(sample_fields())
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .success();
}

#[test]
fn config_init_writes_default_field() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .success()
        .stderr(contains("OK: config written"));

    let listed = cmd()
        .arg("config")
        .arg("list")
        .arg(&config)
        .assert()
        .success();
    let stdout = String::from_utf8(listed.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("1  Field 1  0-3  little"));
}

#[test]
fn config_init_refuses_overwrite() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .success();
    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn config_add_appends_field() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .success();
    cmd()
        .arg("config")
        .arg("add")
        .arg(&config)
        .arg("--name")
        .arg("seq")
        .arg("--range")
        .arg("4-7")
        .arg("--endian")
        .arg("big")
        .assert()
        .success();

    let listed = cmd()
        .arg("config")
        .arg("list")
        .arg(&config)
        .assert()
        .success();
    let stdout = String::from_utf8(listed.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("2  seq  4-7  big"));
}

#[test]
fn config_add_defaults_name_to_position() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .success();
    cmd()
        .arg("config")
        .arg("add")
        .arg(&config)
        .assert()
        .success();

    let listed = cmd()
        .arg("config")
        .arg("list")
        .arg(&config)
        .assert()
        .success();
    let stdout = String::from_utf8(listed.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("2  Field 2  0-3  little"));
}

#[test]
fn config_add_rejects_unknown_endian() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .success();
    cmd()
        .arg("config")
        .arg("add")
        .arg(&config)
        .arg("--endian")
        .arg("middle")
        .assert()
        .failure()
        .stderr(contains("invalid endianness"));
}

#[test]
fn config_add_requires_existing_file() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("add")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("config init"));
}

#[test]
fn config_remove_renumbers_positions() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .success();
    cmd()
        .arg("config")
        .arg("add")
        .arg(&config)
        .arg("--name")
        .arg("seq")
        .arg("--range")
        .arg("4-7")
        .assert()
        .success();
    cmd()
        .arg("config")
        .arg("remove")
        .arg(&config)
        .arg("--position")
        .arg("1")
        .assert()
        .success()
        .stderr(contains("OK: removed"));

    let listed = cmd()
        .arg("config")
        .arg("list")
        .arg(&config)
        .assert()
        .success();
    let stdout = String::from_utf8(listed.get_output().stdout.clone()).expect("utf8 stdout");
    assert!(stdout.contains("1  seq  4-7  little"));
    assert!(!stdout.contains("Field 1"));
}

#[test]
fn config_remove_rejects_out_of_range_position() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("fields.json");

    cmd()
        .arg("config")
        .arg("init")
        .arg(&config)
        .assert()
        .success();
    cmd()
        .arg("config")
        .arg("remove")
        .arg(&config)
        .arg("--position")
        .arg("5")
        .assert()
        .failure()
        .stderr(contains("no field at position 5").and(contains("valid positions are 1-1")));
}
