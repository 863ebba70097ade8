use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bloom"))
        .args(args)
        .env("BLOOM_DATA_DIR", data_dir)
        .env("BLOOM_CONFIG_PATH", data_dir.join("config.json"))
        .output()
        .expect("failed to run bloom")
}

fn write_store(data_dir: &Path, tasks: serde_json::Value) {
    std::fs::write(
        data_dir.join("todos.json"),
        serde_json::to_string(&tasks).unwrap(),
    )
    .unwrap();
}

fn stored(data_dir: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(data_dir.join("todos.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn three_tasks() -> serde_json::Value {
    serde_json::json!([
        {"id": "3", "text": "C", "completed": false, "priority": "medium"},
        {"id": "2", "text": "B", "completed": true, "priority": "medium"},
        {"id": "1", "text": "A", "completed": false, "priority": "medium",
         "aiSuggestion": "You've got this! One step at a time 💪"}
    ])
}

#[test]
fn toggle_command_flips_completion() {
    let dir = TempDir::new().unwrap();
    write_store(dir.path(), three_tasks());

    let done = run(dir.path(), &["toggle", "1"]);
    assert!(done.status.success());
    assert!(String::from_utf8_lossy(&done.stdout).contains("Completed task: A (1)"));
    assert_eq!(stored(dir.path())[2]["completed"], true);

    let reopened = run(dir.path(), &["toggle", "1"]);
    assert!(String::from_utf8_lossy(&reopened.stdout).contains("Reopened task: A (1)"));
    assert_eq!(stored(dir.path()), three_tasks());
}

#[test]
fn toggle_command_ignores_unknown_id() {
    let dir = TempDir::new().unwrap();
    write_store(dir.path(), three_tasks());
    let before = std::fs::read(dir.path().join("todos.json")).unwrap();

    let output = run(dir.path(), &["toggle", "42"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read(dir.path().join("todos.json")).unwrap(), before);
}

#[test]
fn delete_command_keeps_remaining_order() {
    let dir = TempDir::new().unwrap();
    write_store(dir.path(), three_tasks());

    let output = run(dir.path(), &["delete", "2"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Deleted task: B (2)"));
    let ids: Vec<String> = stored(dir.path())
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["3", "1"]);
}

#[test]
fn delete_command_ignores_unknown_id() {
    let dir = TempDir::new().unwrap();
    write_store(dir.path(), three_tasks());

    let output = run(dir.path(), &["delete", "42"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(stored(dir.path()), three_tasks());
}
