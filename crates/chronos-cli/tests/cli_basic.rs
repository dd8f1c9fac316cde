//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify exit codes and output shape.

use std::process::Command;
use std::sync::Mutex;

/// The tests share one dev database; hold this across each test body so
/// load-modify-save cycles from different tests cannot interleave.
static CLI_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> std::sync::MutexGuard<'static, ()> {
    CLI_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Run a CLI command against the dev environment and return output.
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "chronos-cli", "--"])
        .args(args)
        .env("CHRONOS_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_add_and_list() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["timer", "add", "E2E Add Test", "--minutes", "5"]);
    assert_eq!(code, 0, "timer add failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).expect("add prints JSON");
    assert_eq!(event["type"], "TimerAdded");
    assert_eq!(event["target_secs"], 300);

    let (_, _, code) = run_cli(&["timer", "list"]);
    assert_eq!(code, 0, "timer list failed");

    let (stdout, _, code) = run_cli(&["timer", "list", "--json"]);
    assert_eq!(code, 0, "timer list --json failed");
    let timers: serde_json::Value = serde_json::from_str(&stdout).expect("list prints JSON");
    assert!(timers.as_array().is_some());
}

#[test]
fn test_timer_toggle_roundtrip() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["timer", "add", "E2E Toggle Test"]);
    assert_eq!(code, 0);
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = event["timer_id"].as_str().unwrap().to_string();

    let (stdout, _, code) = run_cli(&["timer", "toggle", &id]);
    assert_eq!(code, 0, "toggle (start) failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "TimerStarted");

    let (stdout, _, code) = run_cli(&["timer", "toggle", &id]);
    assert_eq!(code, 0, "toggle (pause) failed");
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "TimerPaused");

    let (stdout, _, code) = run_cli(&["timer", "stop-all"]);
    assert_eq!(code, 0, "stop-all failed");
    assert!(stdout.contains("AllTimersStopped"));

    let (_, _, code) = run_cli(&["timer", "remove", &id]);
    assert_eq!(code, 0, "remove failed");
}

#[test]
fn test_timer_status() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "timer status failed");
    // Status may print completion events first; the snapshot comes last.
    let start = stdout.rfind("\n{").map(|i| i + 1).unwrap_or(0);
    let view: serde_json::Value =
        serde_json::from_str(stdout[start..].trim()).expect("status prints JSON");
    assert!(view.get("date").is_some());
    assert!(view.get("total_secs").is_some());
    assert!(view.get("timers").is_some());
}

#[test]
fn test_unknown_timer_id_fails_cleanly() {
    let _guard = lock();
    let (_, stderr, code) = run_cli(&["timer", "start", "definitely-not-an-id"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown timer id"));
}

#[test]
fn test_stats_today() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["stats", "today"]);
    assert_eq!(code, 0, "stats today failed");
    let view: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(view.get("banked_secs").is_some());
    assert!(view.get("total_secs").is_some());
}

#[test]
fn test_stats_history() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["stats", "history"]);
    assert_eq!(code, 0, "stats history failed");
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(stats.get("days").is_some());
    assert!(stats.get("average_secs_per_day").is_some());
}

#[test]
fn test_history_list() {
    let _guard = lock();
    let (_, _, code) = run_cli(&["history", "list"]);
    assert_eq!(code, 0, "history list failed");
    let (_, _, code) = run_cli(&["history", "list", "--json"]);
    assert_eq!(code, 0, "history list --json failed");
}

#[test]
fn test_config_roundtrip() {
    let _guard = lock();
    let (_, _, code) = run_cli(&["config", "set", "alarm.enabled", "true"]);
    assert_eq!(code, 0, "config set failed");
    let (stdout, _, code) = run_cli(&["config", "get", "alarm.enabled"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "true");
    let (_, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
}

#[test]
fn test_sound_settings() {
    let _guard = lock();
    let (stdout, _, code) = run_cli(&["sound", "volume", "0.5"]);
    assert_eq!(code, 0, "sound volume failed");
    let sound: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(sound["volume"], 0.5);
    assert_eq!(sound["muted"], false);

    let (stdout, _, code) = run_cli(&["sound", "show"]);
    assert_eq!(code, 0, "sound show failed");
    let sound: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(sound.get("volume").is_some());
}
