#![forbid(unsafe_code)]
use assert_cmd::Command;
use chrono::{NaiveDate, Utc};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const ROSTER: &str = r#"[
    {"crew_id": "P1", "role": "pilot", "last_rest_end": "2020-01-01T00:00:00Z"},
    {"crew_id": "P2", "role": "pilot", "last_rest_end": "2999-01-01T00:00:00Z"},
    {"crew_id": "P3", "role": "pilot"},
    {"crew_id": "K1", "role": "cabin", "last_rest_end": "2020-01-01T00:00:00Z"}
]"#;

fn crewplan(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("crewplan").unwrap();
    cmd.arg("--roster")
        .arg(dir.join("crew.json"))
        .arg("--config")
        .arg(dir.join("airline_config.json"))
        .arg("--ledger")
        .arg(dir.join("ledger.json"));
    cmd
}

#[test]
fn assign_staffs_flight_and_persists_ledger() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crew.json"), ROSTER).unwrap();

    crewplan(dir.path())
        .args(["assign", "--flight", "FL100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FL100: [P1, P3, K1]"));

    assert!(dir.path().join("ledger.json").exists());

    crewplan(dir.path())
        .args(["assign", "--flight", "FL200", "--suggest", "1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("FL200: [] SHORTAGE (missing 2 pilot, 1 cabin)"))
        .stdout(predicate::str::contains("standby #1: P2"));

    crewplan(dir.path())
        .args(["schedule", "--crew", "P3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned_flight\": \"FL100\""));
}

#[test]
fn release_frees_crew_for_another_flight() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crew.json"), ROSTER).unwrap();

    crewplan(dir.path()).args(["assign", "--flight", "FL1"]).assert().success();
    crewplan(dir.path())
        .args(["release", "--flight", "FL1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FL1: released 3 crew"));
    crewplan(dir.path())
        .args(["assign", "--flight", "FL2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FL2: [P1, P3, K1]"));
}

#[test]
fn audit_json_and_csv_export() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crew.json"), ROSTER).unwrap();
    let csv_path = dir.path().join("assignments.csv");

    crewplan(dir.path())
        .args(["assign", "--flight", "FL1", "--out-csv"])
        .arg(&csv_path)
        .assert()
        .success();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("flight_id,crew_id,role,shortage\n"));
    assert!(csv.contains("FL1,K1,cabin,false"));

    crewplan(dir.path())
        .args(["audit", "--flight", "FL1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"double_booking_found\": false"));
}

#[test]
fn missing_roster_reports_full_shortage() {
    let dir = tempdir().unwrap();

    crewplan(dir.path())
        .args(["assign", "--flight", "FL1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("FL1: [] SHORTAGE (missing 2 pilot, 1 cabin)"));
}

#[test]
fn reset_clears_every_commitment() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crew.json"), ROSTER).unwrap();

    crewplan(dir.path()).args(["assign", "--flight", "FL1"]).assert().success();
    crewplan(dir.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: all assignments cleared"));
    crewplan(dir.path())
        .args(["suggest", "--needed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("standby #1: P1, P2"))
        .stdout(predicate::str::contains("standby #2: P3, K1"));
}

const DECLARED_ROSTER: &str = r#"[
    {"crew_id": "P1", "role": "pilot"},
    {"crew_id": "P2", "role": "pilot"},
    {"crew_id": "K1", "role": "cabin", "assigned_flight": "FL100"}
]"#;

fn write_ledger(dir: &Path, day: NaiveDate) {
    let json = format!(r#"{{"day": "{day}", "assignments": {{"P1": "FL9"}}}}"#);
    fs::write(dir.join("ledger.json"), json).unwrap();
}

#[test]
fn daily_reset_reseeds_a_stale_ledger_from_the_roster() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crew.json"), DECLARED_ROSTER).unwrap();
    let yesterday = Utc::now().date_naive().pred_opt().unwrap();
    write_ledger(dir.path(), yesterday);

    // sans le drapeau, l'instantané de la veille est repris tel quel
    crewplan(dir.path())
        .args(["schedule", "--crew", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned_flight\": \"FL9\""));
    crewplan(dir.path())
        .args(["schedule", "--crew", "K1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned_flight\": null"));

    crewplan(dir.path())
        .args(["--daily-reset", "schedule", "--crew", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned_flight\": null"));
    crewplan(dir.path())
        .args(["--daily-reset", "schedule", "--crew", "K1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned_flight\": \"FL100\""));
}

#[test]
fn daily_reset_keeps_todays_ledger() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crew.json"), DECLARED_ROSTER).unwrap();
    write_ledger(dir.path(), Utc::now().date_naive());

    crewplan(dir.path())
        .args(["--daily-reset", "schedule", "--crew", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"assigned_flight\": \"FL9\""));
}

#[test]
fn audit_is_clean_after_release_and_reassignment() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crew.json"), DECLARED_ROSTER).unwrap();

    crewplan(dir.path())
        .args(["release", "--flight", "FL100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FL100: released 1 crew"));
    crewplan(dir.path())
        .args(["audit", "--flight", "FL100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues"));

    crewplan(dir.path())
        .args(["assign", "--flight", "FL200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FL200: [P1, P2, K1]"));
    crewplan(dir.path())
        .args(["audit", "--flight", "FL100"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("double-booked").not());
    crewplan(dir.path())
        .args(["audit", "--flight", "FL200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FL200: 3 crew [P1, P2, K1], no issues"));
}
