//! CLI startup behavior: fail fast on missing configuration, and a full
//! single-tick run through the binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ws_core() -> Command {
    let mut cmd = Command::cargo_bin("ws-core").unwrap();
    cmd.env_clear();
    cmd
}

#[test]
fn missing_wearers_path_fails_fast() {
    ws_core()
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing membership document path"));
}

#[test]
fn missing_channel_dirs_fails_fast() {
    ws_core()
        .env("WEARERS_JSON", "/tmp/wearers.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no channel directories configured"));
}

#[test]
fn single_tick_run_emits_rows() {
    let root = TempDir::new().unwrap();
    let roster = root.path().join("wearers.json");
    fs::write(&roster, r#"{"Wearers": [{"id": "42"}]}"#).unwrap();
    let activity_dir = root.path().join("activity");

    ws_core()
        .env("WEARERS_JSON", &roster)
        .env("ACTIVITY_DIR", &activity_dir)
        .args(["--ticks", "1"])
        .assert()
        .success();

    let contents = fs::read_to_string(activity_dir.join("42.csv")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "x,y,time,date");
    assert_eq!(lines.len(), 2);
}

#[test]
fn dry_run_flag_is_accepted_from_env() {
    let root = TempDir::new().unwrap();
    let roster = root.path().join("wearers.json");
    fs::write(&roster, r#"{"Wearers": []}"#).unwrap();

    ws_core()
        .env("WEARERS_JSON", &roster)
        .env("ACTIVITY_DIR", root.path().join("activity"))
        .env("DRY_RUN", "true")
        .env("DELETE_ON_REMOVAL", "true")
        .args(["--ticks", "1"])
        .assert()
        .success();
}
