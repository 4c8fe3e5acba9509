//! End-to-end tests of the `agenda` binary: one JSON object on stdout,
//! exit code 0 on success and 1 on any error envelope.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn agenda(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("agenda").unwrap();
    cmd.env("AGENDA_DATA_DIR", data_dir.path());
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    let text = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(text.trim()).expect("stdout is one JSON object")
}

#[test]
fn calendars_succeeds_with_parseable_json() {
    let data_dir = TempDir::new().unwrap();
    let output = agenda(&data_dir).arg("calendars").output().unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["status"], "success");
    assert_eq!(json["count"], 1);
    assert_eq!(json["calendars"][0]["kind"], "calendar");
}

#[test]
fn output_keys_are_sorted() {
    let data_dir = TempDir::new().unwrap();
    agenda(&data_dir)
        .arg("calendars")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(r#"{"calendars":"#));
}

#[test]
fn unknown_event_id_fails_with_error_envelope() {
    let data_dir = TempDir::new().unwrap();
    let output = agenda(&data_dir)
        .args(["events", "show", "EV-404"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"], "Event not found with ID: EV-404");
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[test]
fn invalid_date_fails_fast() {
    let data_dir = TempDir::new().unwrap();
    let output = agenda(&data_dir)
        .args([
            "events", "create", "--calendar", "CAL-1", "--title", "Standup",
            "--start", "next tuesday",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid date"));
}

#[test]
fn alias_set_use_remove_flow() {
    let data_dir = TempDir::new().unwrap();

    agenda(&data_dir)
        .args(["alias", "set", "work", "CAL-1"])
        .assert()
        .success();

    // The alias resolves on input; output carries the raw identifier.
    let output = agenda(&data_dir)
        .args([
            "events", "create", "--calendar", "work", "--title", "Standup",
            "--start", "2026-03-14T09:00:00",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let created = stdout_json(&output);
    assert_eq!(created["event"]["calendar_id"], "CAL-1");
    let event_id = created["event"]["id"].as_str().unwrap().to_string();

    // The event is there when listed through the alias.
    let output = agenda(&data_dir)
        .args(["events", "list", "--calendar", "work"])
        .output()
        .unwrap();
    let listed = stdout_json(&output);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["events"][0]["id"], event_id.as_str());

    let output = agenda(&data_dir).args(["alias", "list"]).output().unwrap();
    let aliases = stdout_json(&output);
    assert_eq!(aliases["aliases"]["work"], "CAL-1");

    // Removal is total: the second attempt reports false, not an error.
    let output = agenda(&data_dir)
        .args(["alias", "remove", "work"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["removed"], true);

    let output = agenda(&data_dir)
        .args(["alias", "remove", "work"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["removed"], false);

    // With the alias gone, the name passes through and is named in the error.
    let output = agenda(&data_dir)
        .args(["events", "list", "--calendar", "work"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_json(&output)["error"],
        "Calendar not found with ID: work"
    );
}

#[test]
fn corrupted_registry_reads_as_empty() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(data_dir.path().join("aliases.json"), "{{{ nope").unwrap();

    let output = agenda(&data_dir).args(["alias", "list"]).output().unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["count"], 0);
}

#[test]
fn reminder_complete_flow() {
    let data_dir = TempDir::new().unwrap();

    let output = agenda(&data_dir)
        .args([
            "reminders", "create", "--list", "LIST-1", "--title", "Water plants",
            "--due", "2026-03-20", "--priority", "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let created = stdout_json(&output);
    assert_eq!(created["reminder"]["completed"], false);
    assert_eq!(created["reminder"]["priority"], 2);
    let id = created["reminder"]["id"].as_str().unwrap().to_string();

    agenda(&data_dir)
        .args(["reminders", "complete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""completed":true"#));

    // Completed reminders drop out of the default listing.
    let output = agenda(&data_dir)
        .args(["reminders", "list", "--list", "LIST-1"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["count"], 0);

    let output = agenda(&data_dir)
        .args(["reminders", "list", "--list", "LIST-1", "--include-completed"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["count"], 1);
}

#[test]
fn diagnostics_do_not_pollute_stdout() {
    let data_dir = TempDir::new().unwrap();
    let output = agenda(&data_dir)
        .args(["--debug", "calendars"])
        .output()
        .unwrap();

    assert!(output.status.success());
    // stdout must still be exactly one parseable JSON object.
    let json = stdout_json(&output);
    assert_eq!(json["status"], "success");
}
