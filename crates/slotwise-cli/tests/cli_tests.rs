//! Integration tests for the `slotwise` CLI binary.
//!
//! Exercise the resolve, check, and days subcommands through the actual
//! binary, including stdin piping, file input, pinned clocks, and exit codes.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the schedule.json fixture.
fn schedule_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/schedule.json")
}

fn schedule_json() -> String {
    std::fs::read_to_string(schedule_path()).expect("schedule.json fixture must exist")
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolve subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn resolve_from_file_with_pinned_clock() {
    // Monday 2026-09-07: split hours 09-13 and 14-16, one 11:00 booking
    // with a 30-minute buffer that also eats the 10:00 slot.
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "resolve",
            "-i",
            schedule_path(),
            "--date",
            "2026-09-07",
            "--now",
            "2026-09-01 08:00",
        ])
        .assert()
        .success()
        .stdout("09:00\n12:00\n14:00\n15:00\n");
}

#[test]
fn resolve_reads_schedule_from_stdin() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args(["resolve", "--date", "2026-09-07", "--now", "2026-09-01 08:00"])
        .write_stdin(schedule_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("09:00"))
        .stdout(predicate::str::contains("15:00"));
}

#[test]
fn resolve_emits_json_when_asked() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "resolve",
            "-i",
            schedule_path(),
            "--date",
            "2026-09-07",
            "--now",
            "2026-09-01 08:00",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["09:00","12:00","14:00","15:00"]"#));
}

#[test]
fn resolve_blocked_date_prints_nothing() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "resolve",
            "-i",
            schedule_path(),
            "--date",
            "2026-09-14",
            "--now",
            "2026-09-01 08:00",
        ])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn resolve_empty_schedule_falls_back_to_default_slots() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args(["resolve", "--date", "2026-09-07", "--now", "2026-09-01 08:00"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("09:00\n"))
        .stdout(predicate::str::contains("17:00\n"));
}

#[test]
fn resolve_rejects_malformed_date() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args(["resolve", "-i", schedule_path(), "--date", "09/07/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --date"));
}

#[test]
fn resolve_rejects_malformed_schedule_json() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args(["resolve", "--date", "2026-09-07"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse schedule JSON"));
}

#[test]
fn resolve_reports_missing_input_file() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args(["resolve", "-i", "/nonexistent/schedule.json", "--date", "2026-09-07"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Check subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_available_day_exits_zero() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "check",
            "-i",
            schedule_path(),
            "--date",
            "2026-09-07",
            "--today",
            "2026-09-01",
        ])
        .assert()
        .success()
        .stdout("available\n");
}

#[test]
fn check_blocked_day_exits_nonzero() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "check",
            "-i",
            schedule_path(),
            "--date",
            "2026-09-15",
            "--today",
            "2026-09-01",
        ])
        .assert()
        .code(1)
        .stdout("unavailable\n");
}

#[test]
fn check_day_without_rules_exits_nonzero() {
    // 2026-09-08 is a Tuesday; the fixture has no Tuesday rule.
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "check",
            "-i",
            schedule_path(),
            "--date",
            "2026-09-08",
            "--today",
            "2026-09-01",
        ])
        .assert()
        .code(1)
        .stdout("unavailable\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Days subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn days_lists_enabled_unblocked_dates_in_range() {
    // Mondays and Wednesdays in September, minus the blocked 14th-16th;
    // the Friday rule is disabled and contributes nothing.
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "days",
            "-i",
            schedule_path(),
            "--from",
            "2026-09-01",
            "--to",
            "2026-09-30",
            "--today",
            "2026-09-01",
        ])
        .assert()
        .success()
        .stdout(
            "2026-09-02\n2026-09-07\n2026-09-09\n2026-09-21\n2026-09-23\n2026-09-28\n2026-09-30\n",
        );
}

#[test]
fn days_excludes_past_dates() {
    Command::cargo_bin("slotwise")
        .unwrap()
        .args([
            "days",
            "-i",
            schedule_path(),
            "--from",
            "2026-09-01",
            "--to",
            "2026-09-30",
            "--today",
            "2026-09-20",
        ])
        .assert()
        .success()
        .stdout("2026-09-21\n2026-09-23\n2026-09-28\n2026-09-30\n");
}
