//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway config directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_pomotick"))
        .args(args)
        .env("POMOTICK_CONFIG_DIR", config_dir)
        .env_remove("POMOTICK_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_sessions_lists_fixed_durations() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["sessions"]);
    assert_eq!(code, 0, "sessions failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let sessions = parsed["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 3);
    assert_eq!(sessions[0]["type"], "work");
    assert_eq!(sessions[0]["duration_secs"], 1500);
    assert_eq!(sessions[1]["duration_secs"], 300);
    assert_eq!(sessions[2]["duration_secs"], 900);
    assert_eq!(parsed["sessions_before_long_break"], 4);
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "timer.auto_advance"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.auto_advance", "false"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "timer.auto_advance"]);
    assert_eq!(stdout.trim(), "false");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "timer.work_minutes", "50"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"), "stderr: {stderr}");
}

#[test]
fn test_config_list_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "display.bar_width", "12"]);

    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("display.bar_width = 12"));

    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["display"]["bar_width"], 30);
}

#[test]
fn test_run_quits_on_command() {
    use std::io::Write;
    use std::process::Stdio;

    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_pomotick"))
        .args(["run", "--json", "--session", "short_break"])
        .env("POMOTICK_CONFIG_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"q\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first: serde_json::Value =
        serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["session_type"], "short_break");
    assert_eq!(first["time_left_secs"], 300);
    assert_eq!(first["timer_state"], "idle");
}

#[test]
fn test_run_exits_when_stdin_closes_while_idle() {
    use std::process::Stdio;

    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_pomotick"))
        .args(["run", "--json"])
        .env("POMOTICK_CONFIG_DIR", dir.path())
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first: serde_json::Value =
        serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["session_type"], "work");
    assert_eq!(first["timer_state"], "idle");
}
