use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_interactive(data_dir: &Path, input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_bloom");

    let mut child = Command::new(exe)
        .env("BLOOM_DATA_DIR", data_dir)
        .env("BLOOM_CONFIG_PATH", data_dir.join("config.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

#[test]
fn interactive_starts_with_rendered_page() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "exit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Your AI-Powered Productivity Companion"));
    assert!(stdout.contains("Start your productive day!"));
}

#[test]
fn interactive_help_shows_usage() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "help\n?\nexit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
}

#[test]
fn interactive_invalid_command_prints_error() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "nope\nexit\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn interactive_add_shows_banner_and_counts() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "add \"Buy milk\"\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Buy milk"));
    assert!(stdout.contains("[ ] Buy milk"));

    let stored: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("todos.json")).unwrap(),
    )
    .unwrap();
    let suggestion = stored[0]["aiSuggestion"].as_str().unwrap();
    assert!(stdout.contains(&format!("✨ {suggestion}")));
}

#[test]
fn interactive_theme_lasts_for_session_only() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "theme\nlist\nexit\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Theme: dark"));
    assert!(stdout.contains("Bloom · dark"));

    let again = run_interactive(dir.path(), "exit\n");
    assert!(String::from_utf8_lossy(&again.stdout).contains("Bloom · light"));
}

#[test]
fn interactive_rejects_config_overrides() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "list --config-override log_level=debug\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config overrides only apply at startup"));
}

#[test]
fn interactive_list_json_carries_visible_banner() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "add --json \"Buy milk\"\nlist --json\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_lines: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(json_lines.len(), 2);
    let added = &json_lines[0];
    let page = &json_lines[1];
    assert!(added["aiSuggestion"].is_string());
    assert_eq!(page["banner"], added["aiSuggestion"]);
}

#[test]
fn interactive_quoted_blank_add_is_ignored() {
    let dir = TempDir::new().unwrap();
    let output = run_interactive(dir.path(), "add \"   \"\nlist\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains("Added task"));
    assert!(!stderr.contains("ERROR"));
    assert!(stdout.contains("Start your productive day!"));
    assert!(!dir.path().join("todos.json").exists());
}
