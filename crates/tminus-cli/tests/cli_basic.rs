//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory,
//! with the oracle API key unset so categorization falls back locally.

use std::path::Path;
use std::process::Command;

use chrono::{Duration, Utc};
use tempfile::TempDir;

/// Invoke a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    run_cli_in_zone(data_dir, "Etc/GMT", args)
}

/// Like [`run_cli`], with the process-local timezone set to `tz`.
fn run_cli_in_zone(data_dir: &Path, tz: &str, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tminus"))
        .args(args)
        .env("TMINUS_DATA_DIR", data_dir)
        .env("TZ", tz)
        .env_remove("GEMINI_API_KEY")
        .env_remove("TMINUS_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and expect success.
fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

fn list_json(data_dir: &Path) -> Vec<serde_json::Value> {
    let out = run_cli_success(data_dir, &["event", "list", "--json"]);
    serde_json::from_str(&out).expect("Failed to parse JSON output")
}

/// Create an event and return its id.
fn add_event(data_dir: &Path, title: &str, date: &str, time: &str) -> String {
    run_cli_success(data_dir, &["event", "add", title, "--date", date, "--time", time]);
    list_json(data_dir)
        .into_iter()
        .find(|e| e["title"] == title)
        .and_then(|e| e["id"].as_str().map(str::to_string))
        .expect("created event not listed")
}

#[test]
fn test_event_add_and_list() {
    let dir = TempDir::new().unwrap();
    add_event(dir.path(), "Summer trip", "2099-07-01", "09:00");

    let events = list_json(dir.path());
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event["timezone"], "Etc/GMT");
    assert_eq!(event["category"], "Personal");
    assert_eq!(event["countdown"]["finished"], false);
    assert!(event["createdAt"].is_string());
}

#[test]
fn test_event_add_in_past_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["event", "add", "Yesterday", "--date", "2001-01-01", "--time", "00:00"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error: The selected date and time must be in the future"));
    assert!(list_json(dir.path()).is_empty());
}

#[test]
fn test_event_add_requires_fields() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["event", "add", "No date"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("required"));
}

#[test]
fn test_event_edit_keeps_category_when_title_unchanged() {
    let dir = TempDir::new().unwrap();
    let id = add_event(dir.path(), "Standup", "2099-01-01", "09:00");
    run_cli_success(dir.path(), &["event", "set-category", &id, "Work"]);
    run_cli_success(dir.path(), &["event", "edit", &id, "--time", "10:00"]);

    let event = &list_json(dir.path())[0];
    assert_eq!(event["time"], "10:00");
    assert_eq!(event["category"], "Work");
}

#[test]
fn test_event_rm() {
    let dir = TempDir::new().unwrap();
    let id = add_event(dir.path(), "Gone soon", "2099-01-01", "09:00");
    run_cli_success(dir.path(), &["event", "rm", &id]);
    assert!(list_json(dir.path()).is_empty());

    let (_, stderr, code) = run_cli(dir.path(), &["event", "rm", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Event not found"));
}

#[test]
fn test_category_delete_moves_events() {
    let dir = TempDir::new().unwrap();
    let id = add_event(dir.path(), "Conference", "2099-03-01", "08:00");
    run_cli_success(dir.path(), &["category", "add", "Events"]);
    run_cli_success(dir.path(), &["event", "set-category", &id, "Events"]);

    let out = run_cli_success(dir.path(), &["category", "rm", "Events"]);
    assert!(out.contains("Other"));
    assert_eq!(list_json(dir.path())[0]["category"], "Other");

    let (_, _, code) = run_cli(dir.path(), &["category", "add", " work "]);
    assert_eq!(code, 1);
}

#[test]
fn test_export_ics_and_google() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let id = add_event(dir.path(), "New Year", "2099-12-31", "23:00");

    let out_arg = out_dir.path().to_str().unwrap();
    run_cli_success(dir.path(), &["export", "ics", &id, "--out", out_arg]);
    let ics = std::fs::read_to_string(out_dir.path().join("New_Year.ics")).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
    assert!(ics.contains("DTSTART:20991231T230000Z\r\n"));
    assert!(ics.contains("SUMMARY:New Year\r\n"));

    let url = run_cli_success(dir.path(), &["export", "google", &id]);
    assert!(url.contains("text=New%20Year"));
    assert!(url.contains("dates=20991231T230000Z/21000101T000000Z"));
}

#[test]
fn test_export_ics_keeps_file_inside_out_dir() {
    let dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let id = add_event(dir.path(), "AC/DC tour", "2099-06-01", "20:00");

    let out_arg = out_dir.path().to_str().unwrap();
    let out = run_cli_success(dir.path(), &["export", "ics", &id, "--out", out_arg, "--json"]);
    let written: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(written["mimeType"], "text/calendar");

    let expected = out_dir.path().join("AC_DC_tour.ics");
    assert_eq!(written["path"], expected.display().to_string());
    assert!(expected.is_file());
    let entries: Vec<_> = std::fs::read_dir(out_dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

/// Target instant of a fresh `local` event added under `tz`.
fn local_target(tz: &str, date: &str, time: &str) -> serde_json::Value {
    let dir = TempDir::new().unwrap();
    let args = [
        "event", "add", "Wall clock", "--date", date, "--time", time, "--timezone", "local",
    ];
    let (_, stderr, code) = run_cli_in_zone(dir.path(), tz, &args);
    assert_eq!(code, 0, "add failed under {tz}: {stderr}");

    let (out, _, _) = run_cli_in_zone(dir.path(), tz, &["event", "list", "--json"]);
    let events: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    let id = events[0]["id"].as_str().unwrap().to_string();
    let (out, _, _) = run_cli_in_zone(dir.path(), tz, &["event", "show", &id, "--json"]);
    let shown: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(shown["timezone"], "local");
    shown["countdown"]["target"].clone()
}

#[test]
fn test_local_wall_clock_across_dst_transitions() {
    if !Path::new("/usr/share/zoneinfo/America/New_York").exists() {
        eprintln!("skipping: no tz database on this host");
        return;
    }
    let tz = "America/New_York";

    // 02:30 does not exist on spring-forward day; it reads as 03:30 EDT.
    assert_eq!(local_target(tz, "2031-03-09", "02:30"), "2031-03-09T07:30:00Z");
    // 01:30 happens twice on fall-back day; the earlier (EDT) reading wins.
    assert_eq!(local_target(tz, "2031-11-02", "01:30"), "2031-11-02T05:30:00Z");
    // An ordinary instant is plain EST.
    assert_eq!(local_target(tz, "2031-01-15", "12:00"), "2031-01-15T17:00:00Z");
}

#[test]
fn test_scan_event_without_image_fails() {
    let dir = TempDir::new().unwrap();
    let id = add_event(dir.path(), "Plain", "2099-02-01", "10:00");

    let (_, stderr, code) = run_cli(dir.path(), &["scan", "--event", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("has no background image"));

    let (_, _, code) = run_cli(dir.path(), &["scan"]);
    assert_eq!(code, 2);
}

#[test]
fn test_watch_exits_when_finished() {
    let dir = TempDir::new().unwrap();
    let id = add_event(dir.path(), "Kickoff", "2099-01-01", "09:00");
    let earlier = Utc::now() - Duration::hours(1);
    let date = earlier.format("%Y-%m-%d").to_string();
    let time = earlier.format("%H:%M").to_string();
    run_cli_success(dir.path(), &["event", "edit", &id, "--date", &date, "--time", &time]);

    let out = run_cli_success(dir.path(), &["watch", &id]);
    assert!(out.contains("finished"));
    assert!(out.contains("100.0%"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["config", "set", "display.tick_interval_ms", "250"]);
    let value = run_cli_success(dir.path(), &["config", "get", "display.tick_interval_ms"]);
    assert_eq!(value.trim(), "250");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "display.nope"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "display.tick_interval_ms", "0"]);
    assert_eq!(code, 1);
}

#[test]
fn test_timezones_and_completions() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["timezones"]);
    assert!(out.contains("* Etc/GMT"));
    assert!(out.contains("Asia/Tokyo"));

    let script = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(script.contains("tminus"));
}
