//! End-to-end runs of the `mm_report` binary against snapshot files.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const SNAPSHOT: &str = r#"{
    "workOrders": [
        {
            "id": "1", "machineId": "m1", "status": "done",
            "openedAt": "2024-01-12T08:00:00Z",
            "breakdownAt": "2024-01-12T08:00:00Z",
            "repairStartAt": "2024-01-12T08:00:00Z",
            "repairEndAt": "2024-01-12T09:00:00Z",
            "backInOperationAt": "2024-01-12T10:00:00Z"
        },
        {
            "id": "2", "machineId": "m2", "status": "done",
            "openedAt": "2024-01-15T08:00:00Z",
            "breakdownAt": "2024-01-15T08:00:00Z",
            "repairStartAt": "2024-01-15T08:00:00Z",
            "repairEndAt": "2024-01-15T11:00:00Z",
            "backInOperationAt": "2024-01-15T11:00:00Z"
        },
        {
            "id": "3", "machineId": "m1", "status": "open",
            "openedAt": "2024-02-01T08:00:00Z"
        }
    ],
    "machines": [
        {"id": "m1", "name": "Press", "location": "Line 1", "status": "operational", "operatingHoursPerMonth": 720},
        {"id": "m2", "name": "Lathe", "location": "Line 2", "status": "operational", "operatingHoursPerMonth": 720},
        {"id": "m3", "name": "Pump", "location": "Line 2", "status": "stopped", "operatingHoursPerMonth": 720}
    ],
    "downtime": [
        {
            "id": "d1", "machineId": "m1", "workOrderId": "1", "kind": "emergency",
            "status": "finished",
            "startAt": "2024-01-12T08:00:00Z", "endAt": "2024-01-12T10:00:00Z"
        }
    ]
}"#;

fn snapshot_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn report(file: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("mm_report").unwrap();
    cmd.arg("--data").arg(file.path()).env("RUST_LOG", "off");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn summary_in_january() {
    let file = snapshot_file(SNAPSHOT);
    let value = json_output(
        report(&file).args(["--from", "2024-01-01", "--to", "2024-01-31", "--json", "summary"]),
    );
    assert_eq!(value["orders"], 2);
    assert_eq!(value["mttr"], 2.0);
    assert_eq!(value["mtbf"], 720.0);
    assert_eq!(value["availability"], 66.7);
    assert_eq!(value["stoppages"], 2);
    assert_eq!(value["machines"], 3);
}

#[test]
fn summary_narrowed_to_location() {
    let file = snapshot_file(SNAPSHOT);
    let value = json_output(report(&file).args(["--location", "Line 2", "--json", "summary"]));
    assert_eq!(value["orders"], 1);
    assert_eq!(value["machines"], 2);
    assert_eq!(value["availability"], 50.0);
    assert_eq!(value["mttr"], 3.0);
}

#[test]
fn machine_metrics_over_range() {
    let file = snapshot_file(SNAPSHOT);
    let value = json_output(
        report(&file).args(["--from", "2024-01-01", "--to", "2024-01-30", "--json", "machine", "m1"]),
    );
    assert_eq!(value["periodDays"], 30);
    assert_eq!(value["periodOperatingHours"], 720.0);
    assert_eq!(value["mtbf"], 720.0);
    assert_eq!(value["operatingHoursRemaining"], 718.0);
    assert_eq!(value["stoppages"], 1);
}

#[test]
fn open_ended_range_uses_configured_period() {
    let file = snapshot_file(SNAPSHOT);
    let config = snapshot_file(r#"{"defaultPeriodDays": 7}"#);
    let value = json_output(
        report(&file)
            .arg("--config")
            .arg(config.path())
            .args(["--from", "2024-01-01", "--json", "machine", "m1"]),
    );
    assert_eq!(value["periodDays"], 7);
    assert_eq!(value["periodOperatingHours"], 168.0);
    assert_eq!(value["operatingHoursRemaining"], 166.0);
}

#[test]
fn date_field_flag_uses_config_tags() {
    let file = snapshot_file(SNAPSHOT);
    let value = json_output(
        report(&file).args(["--date-field", "completed", "--from", "2024-02-01", "--json", "summary"]),
    );
    assert_eq!(value["orders"], 1);

    report(&file)
        .args(["--date-field", "closed", "summary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown variant `closed`"));
}

#[test]
fn machine_text_output() {
    let file = snapshot_file(SNAPSHOT);
    report(&file)
        .args(["machine", "m1", "--days", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downtime:          2h 0min"))
        .stdout(predicate::str::contains("MTTR:              1.0 h"));
}

#[test]
fn unknown_machine_fails() {
    let file = snapshot_file(SNAPSHOT);
    report(&file)
        .args(["machine", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("machine `nope` not found"));
}

#[test]
fn fleet_filtered_by_location() {
    let file = snapshot_file(SNAPSHOT);
    let value = json_output(report(&file).args(["--location", "Line 2", "--json", "fleet"]));
    let rows = value["machines"].as_array().unwrap();
    let ids: Vec<&str> = rows.iter().map(|r| r["machineId"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["m2", "m3"]);
    assert_eq!(rows[0]["doneOrders"], 1);
    assert_eq!(value["averages"]["availability"], 50.0);
    assert_eq!(value["averages"]["mttr"], 1.5);
}

#[test]
fn downtime_summary() {
    let file = snapshot_file(SNAPSHOT);
    let value = json_output(report(&file).args(["--json", "downtime", "m1"]));
    assert_eq!(value["records"], 1);
    assert_eq!(value["emergencyHours"], 2.0);
}

#[test]
fn downtime_respects_period() {
    let file = snapshot_file(SNAPSHOT);
    let value = json_output(report(&file).args(["--from", "2024-02-01", "--json", "downtime", "m1"]));
    assert_eq!(value["records"], 0);
    assert_eq!(value["totalHours"], 0.0);
}

#[test]
fn check_warns_about_ignored_filters() {
    let file = snapshot_file(SNAPSHOT);
    report(&file)
        .env("RUST_LOG", "warn")
        .args(["--location", "Line 2", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("integrity check covers the whole snapshot"));
}

#[test]
fn check_reports_dangling_orders() {
    let broken = SNAPSHOT.replace(r#""machineId": "m2", "status": "done""#, r#""machineId": "m9", "status": "done""#);
    let file = snapshot_file(&broken);
    report(&file)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("order 2 references unknown machine m9"));
}

#[test]
fn malformed_snapshot_fails_fast() {
    let file = snapshot_file(r#"{"machines": [{"id": "m1", "status": "broken"}]}"#);
    report(&file)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing snapshot"));
}

#[test]
fn rejects_inverted_range() {
    let file = snapshot_file(SNAPSHOT);
    report(&file)
        .args(["--from", "2024-02-01", "--to", "2024-01-01", "summary"])
        .assert()
        .failure();
}
