//! End-to-end tests of the `veripipe` binary

use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use super::helpers::*;

fn veripipe(fixture: &Fixture, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_veripipe"))
        .arg("--root")
        .arg(fixture.root())
        .args(args)
        .env_remove("VERIPIPE_CONFIG")
        .env_remove("VERIPIPE_LOG")
        .output()
        .expect("Failed to run veripipe")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_run_ready_exits_zero_and_persists_snapshot() {
    let fixture = Fixture::new(&[
        ("alpha", passing_tool("alpha").as_str()),
        ("beta", passing_tool("beta").as_str()),
    ]);

    let output = veripipe(&fixture, &["run", "--no-color"]);

    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    let text = stdout(&output);
    assert!(text.contains("Overall Status:    READY"));
    assert!(!text.contains('\x1b'));
    assert!(text.is_ascii(), "{text}");
    assert!(fixture.memory_path().is_file());

    let status = veripipe(&fixture, &["status", "--json"]);
    let json: Value = serde_json::from_slice(&status.stdout).unwrap();
    assert_eq!(json["integrity_score"], 100.0);
    assert_eq!(json["latest_pipeline_status"], "ready");

    let inspect = veripipe(&fixture, &["inspect"]);
    assert_eq!(inspect.status.code(), Some(0));
    assert!(stdout(&inspect).contains("ENGINE INSPECTOR DIAGNOSTICS"));

    let topology = veripipe(&fixture, &["topology", "--ascii"]);
    let map = stdout(&topology);
    assert!(map.contains("[+] alpha"));
    assert!(map.contains("[+] beta"));
}

#[test]
fn test_run_not_ready_exits_one() {
    let fixture = Fixture::new(&[("alpha", failing_tool("alpha", "not_ready").as_str())]);

    let output = veripipe(&fixture, &["run", "--json"]);

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["orchestrator"], "verification_orchestrator");
    assert_eq!(json["overall_status"], "not_ready");
    assert_eq!(json["verifications"]["alpha"]["exit_code"], 1);
}

#[test]
fn test_views_without_snapshot() {
    let fixture = Fixture::new(&[("alpha", passing_tool("alpha").as_str())]);

    let inspect = veripipe(&fixture, &["inspect", "--json"]);
    assert_eq!(inspect.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&inspect.stdout).unwrap();
    assert_eq!(json["category"], "engine_inspector");
    assert_eq!(json["status"], "error");

    let status = veripipe(&fixture, &["status", "--json"]);
    assert_eq!(status.status.code(), Some(0));
    let json: Value = serde_json::from_slice(&status.stdout).unwrap();
    assert_eq!(json["latest_pipeline_status"], "unknown");
}

#[test]
fn test_render_from_file_and_stdin() {
    let fixture = Fixture::new(&[("alpha", passing_tool("alpha").as_str())]);
    let run = veripipe(&fixture, &["run", "--json"]);
    let report_path = fixture.root().join("report.json");
    fs::write(&report_path, &run.stdout).unwrap();

    let from_file = veripipe(
        &fixture,
        &["render", report_path.to_str().unwrap(), "--no-color"],
    );
    assert_eq!(from_file.status.code(), Some(0));
    assert!(stdout(&from_file).contains("System is operational"));

    let mut child = Command::new(env!("CARGO_BIN_EXE_veripipe"))
        .args(["render", "--no-color"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&run.stdout).unwrap();
    let from_stdin = child.wait_with_output().unwrap();
    assert_eq!(from_stdin.status.code(), Some(0));
    assert!(stdout(&from_stdin).is_ascii());
}

#[test]
fn test_render_rejects_malformed_report() {
    let fixture = Fixture::new(&[]);
    let path = fixture.root().join("bad.json");
    fs::write(&path, r#"{"verifications": {"a": {}}, "execution_order": []}"#).unwrap();

    let output = veripipe(&fixture, &["render", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid pipeline report"));
}

#[test]
fn test_invalid_config_exits_two() {
    let fixture = Fixture::new(&[]);
    fs::write(fixture.root().join("veripipe.toml"), "[[tool]]\ncategory = \"a\"\ncommand = []\n")
        .unwrap();

    let output = veripipe(&fixture, &["run"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty command"));
}

#[test]
fn test_self_check() {
    let fixture = Fixture::new(&[]);

    let output = veripipe(&fixture, &["self-check", "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["category"], "system_memory");
    assert_eq!(json["status"], "ready");
}
