//! Integration tests for the `tl` CLI.
//!
//! Each test creates a temp data directory, runs `tl` as a subprocess
//! against it, and verifies stdout and/or the stored files.

use std::fs;
use std::path::Path;
use std::process::Command;

const SAMPLE: &str = r#"[{"key":"1","value":"Task 1","completed":false,"image":null},{"key":"2","value":"Task 2","completed":true,"image":null}]"#;

/// Seed a data directory with a short debounce and the two-task sample list.
fn create_data_dir(root: &Path) {
    fs::write(root.join("config.toml"), "[store]\ndebounce_ms = 20\n").unwrap();
    fs::write(root.join("tasks.json"), SAMPLE).unwrap();
}

/// Run `tl -C <dir> <args>`, returning (stdout, stderr, success).
fn run_tl(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_tl"))
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("TASKLIST_DIR")
        .env_remove("TASKLIST_LOG")
        .output()
        .expect("failed to run tl");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `tl` expecting success, return stdout.
fn run_tl_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tl(dir, args);
    if !success {
        panic!(
            "tl {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn stored(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("tasks.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn list_all() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let out = run_tl_ok(tmp.path(), &["list"]);
    assert_eq!(out, "[ ] 1 Task 1\n[x] 2 Task 2\n");
}

#[test]
fn list_completed() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let out = run_tl_ok(tmp.path(), &["list", "--completed"]);
    assert_eq!(out, "[x] 2 Task 2\n");
}

#[test]
fn list_json_uses_storage_layout() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let out = run_tl_ok(tmp.path(), &["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["count"], 2);
    assert_eq!(parsed["tasks"][0]["key"], "1");
    assert_eq!(parsed["tasks"][0]["value"], "Task 1");
    assert_eq!(parsed["tasks"][1]["completed"], true);
    assert!(parsed["tasks"][1]["image"].is_null());
}

#[test]
fn list_empty_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (out, err, ok) = run_tl(tmp.path(), &["list"]);
    assert!(ok);
    assert_eq!(out, "");
    assert_eq!(err, "");
}

#[test]
fn list_corrupt_store_reports_and_shows_nothing() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), "{oops").unwrap();

    let (out, err, ok) = run_tl(tmp.path(), &["list"]);
    assert!(ok);
    assert_eq!(out, "");
    assert!(err.contains("Could not load tasks"));
}

#[test]
fn search_is_case_insensitive() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());
    run_tl_ok(tmp.path(), &["add", "Buy MILK"]);

    let out = run_tl_ok(tmp.path(), &["search", "milk"]);
    assert!(out.contains("Buy MILK"));
    assert!(!out.contains("Task 1"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn add_persists_and_confirms() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let out = run_tl_ok(tmp.path(), &["add", "Buy milk"]);
    assert_eq!(out, "Task added: Buy milk\n");

    let tasks = stored(tmp.path());
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[2]["value"], "Buy milk");
    assert_eq!(tasks[2]["completed"], false);
    assert!(tasks[2]["image"].is_null());
    assert!(tasks[2]["key"].as_str().unwrap().parse::<u64>().is_ok());
}

#[test]
fn add_blank_fails_without_writing() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let (_, err, ok) = run_tl(tmp.path(), &["add", "   "]);
    assert!(!ok);
    assert!(err.contains("cannot be empty"));
    assert_eq!(fs::read_to_string(tmp.path().join("tasks.json")).unwrap(), SAMPLE);
}

#[test]
fn toggle_then_remove() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    assert_eq!(run_tl_ok(tmp.path(), &["toggle", "1"]), "1 done\n");
    assert_eq!(stored(tmp.path())[0]["completed"], true);

    assert_eq!(run_tl_ok(tmp.path(), &["rm", "2"]), "2 removed\n");
    let tasks = stored(tmp.path());
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["key"], "1");
}

#[test]
fn unknown_id_is_a_note_not_a_failure() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let (out, err, ok) = run_tl(tmp.path(), &["rm", "404"]);
    assert!(ok);
    assert_eq!(out, "");
    assert!(err.contains("no task with id 404"));
    assert_eq!(fs::read_to_string(tmp.path().join("tasks.json")).unwrap(), SAMPLE);
}

#[test]
fn edit_replaces_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    run_tl_ok(tmp.path(), &["edit", "1", "Edited Task"]);
    assert_eq!(stored(tmp.path())[0]["value"], "Edited Task");
}

#[test]
fn image_attaches_file_uri() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());
    let photo = tmp.path().join("photo.jpg");
    fs::write(&photo, b"jpeg").unwrap();

    run_tl_ok(tmp.path(), &["image", "2", photo.to_str().unwrap()]);
    let uri = stored(tmp.path())[1]["image"].as_str().unwrap().to_string();
    assert!(uri.starts_with("file://"));
    assert!(uri.ends_with("/photo.jpg"));

    let out = run_tl_ok(tmp.path(), &["list", "--completed"]);
    assert!(out.contains("@file://"));
}

#[test]
fn image_missing_file_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    let missing = tmp.path().join("missing.jpg");
    let (_, err, ok) = run_tl(tmp.path(), &["image", "1", missing.to_str().unwrap()]);
    assert!(!ok);
    assert!(err.contains("Could not attach image"));
    assert_eq!(fs::read_to_string(tmp.path().join("tasks.json")).unwrap(), SAMPLE);
}

#[test]
fn write_refused_when_store_is_corrupt() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), "{oops").unwrap();

    let (_, err, ok) = run_tl(tmp.path(), &["add", "anything"]);
    assert!(!ok);
    assert!(err.contains("nothing was changed"));
    assert_eq!(fs::read_to_string(tmp.path().join("tasks.json")).unwrap(), "{oops");
}

#[test]
fn widget_snapshot_follows_mutations() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    run_tl_ok(tmp.path(), &["toggle", "2"]);
    let widget = fs::read_to_string(tmp.path().join("widget.json")).unwrap();
    let widget: serde_json::Value = serde_json::from_str(&widget).unwrap();
    assert_eq!(widget, stored(tmp.path()));
    assert_eq!(widget[1]["completed"], false);
}

#[test]
fn widget_can_be_disabled() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());
    run_tl_ok(tmp.path(), &["config", "set", "widget.enabled", "false"]);

    run_tl_ok(tmp.path(), &["toggle", "2"]);
    assert!(!tmp.path().join("widget.json").exists());
}

// ---------------------------------------------------------------------------
// Init and config
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config_once() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().join("fresh");

    let out = run_tl_ok(&dir, &["init"]);
    assert!(out.contains("Initialized tasklist"));
    assert!(dir.join("config.toml").exists());

    let (_, err, ok) = run_tl(&dir, &["init"]);
    assert!(!ok);
    assert!(err.contains("already initialized"));

    run_tl_ok(&dir, &["init", "--force"]);
}

#[test]
fn config_set_then_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_data_dir(tmp.path());

    assert_eq!(
        run_tl_ok(tmp.path(), &["config", "set", "store.debounce_ms", "30"]),
        "store.debounce_ms = 30\n"
    );
    let out = run_tl_ok(tmp.path(), &["config", "show", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["store"]["debounce_ms"], 30);
    assert_eq!(parsed["widget"]["enabled"], true);
}

#[test]
fn config_set_unknown_key_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, err, ok) = run_tl(tmp.path(), &["config", "set", "store.nope", "1"]);
    assert!(!ok);
    assert!(err.contains("unknown config key"));
}
