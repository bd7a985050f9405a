//! CLI tests for the `rb edit` subcommand.

use std::fs;
use std::process::{Command, Output};

use assert_cmd::cargo;

const SAMPLE_RECORD: &str = r#"{
  "name": "Alice Pauline",
  "phone": "94351253",
  "email": "alice@example.com",
  "address": "123, Jurong West Ave 6",
  "desired_role": "Data Analyst",
  "skills": ["Python", "SQL"],
  "experience": 4,
  "status": "Applied",
  "note": "Prefers remote",
  "tags": ["friends"]
}"#;

fn rb_cmd() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("rb"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path.to_string_lossy().to_string())
}

fn edit_json(extra: &[&str], args: &[&str]) -> (Output, serde_json::Value) {
    let output = rb_cmd()
        .args(["--output", "json", "edit"])
        .args(extra)
        .args(args)
        .output()
        .expect("run edit command");
    let json = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not json ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    });
    (output, json)
}

// ── Success ─────────────────────────────────────────────────────────────

#[test]
fn edit_reports_only_given_fields() {
    let (output, json) = edit_json(&[], &["1", "n/John", "Doe", "p/91234567", "t/"]);
    assert!(output.status.success());
    assert_eq!(json["ok"], true);
    assert_eq!(json["index"], 1);
    assert_eq!(
        json["edited_fields"],
        serde_json::json!(["name", "phone", "tags"])
    );
    assert_eq!(
        json["descriptor"],
        serde_json::json!({ "name": "John Doe", "phone": "91234567", "tags": [] })
    );
    assert_eq!(json["warnings"], serde_json::json!([]));
    assert!(json.get("candidate").is_none());
}

#[test]
fn edit_single_argument_string_is_accepted() {
    let (output, json) = edit_json(&[], &["3 st/offered ex/7"]);
    assert!(output.status.success());
    assert_eq!(json["descriptor"]["status"], "Offered");
    assert_eq!(json["descriptor"]["experience"], 7);
}

#[test]
fn edit_repeated_tag_is_a_warning() {
    let (output, json) = edit_json(&[], &["2", "t/vip", "t/vip"]);
    assert!(output.status.success());
    assert_eq!(json["descriptor"]["tags"], serde_json::json!(["vip"]));
    assert_eq!(json["warnings"][0]["id"], "RB2001");
    assert_eq!(json["warnings"][0]["severity"], "warn");
}

#[test]
fn edit_with_record_prints_merged_candidate() {
    let (_dir, path) = write_temp("alice.json", SAMPLE_RECORD);
    let (output, json) = edit_json(&["--record", &path], &["1", "p/91234567", "t/"]);
    assert!(output.status.success());

    let candidate = &json["candidate"];
    assert_eq!(candidate["phone"], "91234567");
    assert_eq!(candidate["tags"], serde_json::json!([]));
    assert_eq!(candidate["name"], "Alice Pauline");
    assert_eq!(candidate["skills"], serde_json::json!(["Python", "SQL"]));
    assert_eq!(candidate["note"], "Prefers remote");
}

#[test]
fn edit_pretty_lists_fields() {
    let output = rb_cmd()
        .args(["--output", "pretty", "edit", "4", "n/Amy", "note/", "t/"])
        .output()
        .expect("run edit command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Editing candidate 4"), "stdout: {stdout}");
    assert!(stdout.contains("name:"), "stdout: {stdout}");
    assert!(stdout.contains("Amy"), "stdout: {stdout}");
    assert!(stdout.contains("(cleared)"), "stdout: {stdout}");
}

// ── Failures ────────────────────────────────────────────────────────────

#[test]
fn edit_invalid_index_fails_with_usage() {
    let (output, json) = edit_json(&[], &["--", "-5", "n/Amy"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json["ok"], false);
    assert_eq!(json["diagnostics"][0]["id"], "RB1001");
    assert!(
        json["usage"]
            .as_str()
            .is_some_and(|u| u.contains("INDEX (must be a positive integer)"))
    );
}

#[test]
fn edit_nothing_to_edit_fails() {
    let (output, json) = edit_json(&[], &["1"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json["diagnostics"][0]["id"], "RB1201");
    assert_eq!(
        json["diagnostics"][0]["message"],
        "At least one field to edit must be provided."
    );
    assert!(json.get("usage").is_none());
}

#[test]
fn edit_duplicate_prefix_fails() {
    let (output, json) = edit_json(&[], &["2", "n/", "n/Amy"]);
    assert_eq!(output.status.code(), Some(1));
    let diag = &json["diagnostics"][0];
    assert_eq!(diag["id"], "RB1202");
    assert_eq!(
        diag["message"],
        "Multiple values specified for the following single-valued field(s): n/"
    );
    assert_eq!(diag["context"]["prefixes"], "n/");
}

#[test]
fn edit_invalid_field_points_at_value() {
    let (output, json) = edit_json(&[], &["1", "p/12x4"]);
    assert_eq!(output.status.code(), Some(1));
    let diag = &json["diagnostics"][0];
    assert_eq!(diag["id"], "RB1101");
    assert_eq!(diag["context"]["field"], "phone");
    // "1 p/12x4": the value starts after the tag.
    assert_eq!(diag["span"], serde_json::json!({ "start": 4, "end": 8 }));
}

#[test]
fn edit_pretty_error_renders_to_stderr() {
    let output = rb_cmd()
        .args(["--output", "pretty", "edit", "1", "e/not-an-email"])
        .output()
        .expect("run edit command");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RB1101"), "stderr: {stderr}");
    assert!(stderr.contains("1 error"), "stderr: {stderr}");
}

// ── Rules and logging ───────────────────────────────────────────────────

#[test]
fn edit_uses_rules_file() {
    let (_dir, path) = write_temp("rules.json", r#"{ "min_phone_digits": 8 }"#);
    let (output, json) = edit_json(&[], &["1", "p/1234"]);
    assert!(output.status.success(), "default rules accept 4 digits: {json}");

    let output = rb_cmd()
        .args(["--output", "json", "--rules", &path, "edit", "1", "p/1234"])
        .output()
        .expect("run edit command");
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["diagnostics"][0]["context"]["field"], "phone");
}

#[test]
fn edit_invalid_rules_file_is_an_error() {
    let (_dir, path) = write_temp("rules.json", r#"{ "statuses": [] }"#);
    let output = rb_cmd()
        .args(["--output", "json", "--rules", &path, "edit", "1", "n/Amy"])
        .output()
        .expect("run edit command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid rules file"), "stderr: {stderr}");
}

#[test]
fn edit_missing_record_is_an_error() {
    let output = rb_cmd()
        .args([
            "--output",
            "json",
            "edit",
            "--record",
            "does-not-exist.json",
            "1",
            "n/Amy",
        ])
        .output()
        .expect("run edit command");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read record"), "stderr: {stderr}");
}

#[test]
fn verbose_flag_logs_to_stderr() {
    let output = rb_cmd()
        .args(["-v", "--output", "json", "edit", "1", "n/Amy"])
        .output()
        .expect("run edit command");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parsed edit request"), "stderr: {stderr}");
    // stdout stays pure JSON.
    let _: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
}
