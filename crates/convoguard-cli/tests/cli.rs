use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::{contains, starts_with};
use tempfile::TempDir;

fn convoguard(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("convoguard"));
    // Point at a missing file so a developer's own config never leaks in.
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("missing.toml"));
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn four_turns() -> String {
    let turns: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .enumerate()
        .map(|(i, ch)| {
            let role = if i % 2 == 0 { "assistant" } else { "user" };
            serde_json::json!({ "role": role, "content": ch.repeat(100) })
        })
        .collect();
    serde_json::to_string(&turns).unwrap()
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    convoguard(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Convoguard"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    convoguard(dir.path()).arg("--version").assert().success();
}

#[test]
fn test_cli_completions() {
    let dir = TempDir::new().unwrap();
    convoguard(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(starts_with("_convoguard"));
}

#[test]
fn test_trim_pins_first_message() {
    let dir = TempDir::new().unwrap();
    let transcript = write(&dir, "transcript.json", &four_turns());
    let output = dir.path().join("trimmed.json");

    convoguard(dir.path())
        .args(["--format", "json", "trim"])
        .arg(&transcript)
        .args(["--target", "60", "--overhead-tokens", "0", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("\"strategy\": \"trimmed\""))
        .stdout(contains("\"tokens_after\": 50"));

    let written: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0]["content"], "a".repeat(100));
    assert_eq!(written[1]["content"], "d".repeat(100));
}

#[test]
fn test_trim_without_target_fails() {
    let dir = TempDir::new().unwrap();
    let transcript = write(&dir, "transcript.json", &four_turns());

    convoguard(dir.path())
        .arg("trim")
        .arg(&transcript)
        .assert()
        .failure()
        .stderr(contains("--target"));
}

#[test]
fn test_trim_reads_target_from_config() {
    let dir = TempDir::new().unwrap();
    let transcript = write(&dir, "transcript.json", &four_turns());
    let config = write(&dir, "config.toml", "[compaction]\ntarget_tokens = 1000\n");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("convoguard"));
    cmd.arg("--config")
        .arg(&config)
        .args(["--format", "json", "trim"])
        .arg(&transcript)
        .assert()
        .success()
        .stdout(contains("\"strategy\": \"untouched\""));
}

#[test]
fn test_fallback_keeps_newest_fraction() {
    let dir = TempDir::new().unwrap();
    let messages: Vec<_> = (0..10)
        .map(|i| serde_json::json!({ "role": "user", "content": format!("turn {i}") }))
        .collect();
    let transcript = write(
        &dir,
        "transcript.json",
        &serde_json::to_string(&messages).unwrap(),
    );

    convoguard(dir.path())
        .args(["--format", "json", "fallback"])
        .arg(&transcript)
        .args(["--retain-percent", "0.5"])
        .assert()
        .success()
        .stdout(contains("\"strategy\": \"fallback\""))
        .stdout(contains("turn 5"))
        .stdout(contains("turn 9"))
        .stdout(contains("turn 4").not());
}

#[test]
fn test_govern_without_compacted_falls_back() {
    let dir = TempDir::new().unwrap();
    let transcript = write(&dir, "original.json", &four_turns());

    convoguard(dir.path())
        .args(["--format", "json", "govern"])
        .arg(&transcript)
        .assert()
        .success()
        .stdout(contains("\"strategy\": \"fallback\""));
}

#[test]
fn test_govern_with_unreadable_compacted_fails() {
    let dir = TempDir::new().unwrap();
    let transcript = write(&dir, "original.json", &four_turns());

    convoguard(dir.path())
        .args(["--format", "json", "govern"])
        .arg(&transcript)
        .arg("--compacted")
        .arg(dir.path().join("typo-does-not-exist.json"))
        .assert()
        .failure()
        .stderr(contains("typo-does-not-exist.json"))
        .stdout(contains("fallback").not());
}

#[test]
fn test_govern_trims_compacted_transcript() {
    let dir = TempDir::new().unwrap();
    let original = write(&dir, "original.json", &four_turns());
    let compacted = write(&dir, "compacted.json", &four_turns());

    convoguard(dir.path())
        .args(["--format", "json", "govern"])
        .arg(&original)
        .arg("--compacted")
        .arg(&compacted)
        .args(["--context-tokens", "240", "--overhead-tokens", "0"])
        .assert()
        .success()
        .stdout(contains("\"strategy\": \"trimmed\""));
}

#[test]
fn test_invalid_transcript_reports_error() {
    let dir = TempDir::new().unwrap();
    let transcript = write(&dir, "broken.json", "{ not json");

    convoguard(dir.path())
        .args(["fallback"])
        .arg(&transcript)
        .assert()
        .failure()
        .stderr(contains("broken.json"));
}

#[test]
fn test_policy_zero_retries() {
    let dir = TempDir::new().unwrap();
    convoguard(dir.path())
        .args(["--format", "json", "policy", "--max-retries", "0"])
        .assert()
        .success()
        .stdout(contains("\"max_retries\": 0"))
        .stdout(contains("1200"));
}

#[test]
fn test_failover_replay() {
    let dir = TempDir::new().unwrap();
    let events = write(
        &dir,
        "events.json",
        r#"[
            {"profile": "primary", "error": "request timed out"},
            {"profile": "primary", "error": "request timed out"},
            {"profile": "secondary", "kind": "other"}
        ]"#,
    );

    let output = convoguard(dir.path())
        .args(["--format", "json", "failover"])
        .arg(&events)
        .output()
        .unwrap();
    assert!(output.status.success());

    let steps: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["decision"]["action"], "retry");
    assert_eq!(steps[1]["decision"]["action"], "rotate");
    assert_eq!(steps[1]["consecutive_timeouts"], 2);
    assert_eq!(steps[2]["kind"], "other");
    assert_eq!(steps[2]["consecutive_timeouts"], 0);
}
