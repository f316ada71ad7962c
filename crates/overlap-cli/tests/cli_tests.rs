//! Integration tests for the `overlap` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to drive the real binary: store
//! mutations through a JSON file, aggregation from the store, from a file and
//! from stdin, and argument errors.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the records.json fixture.
fn records_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/records.json")
}

/// Helper: a fresh store path under /tmp, removed if left over from a prior run.
fn fresh_store(name: &str) -> String {
    let path = format!("/tmp/overlap-test-{}-{}.json", name, std::process::id());
    let _ = std::fs::remove_file(&path);
    path
}

/// Helper: `overlap --store <store> <args...>`, asserting success, returning stdout.
fn run(store: &str, args: &[&str]) -> String {
    let output = Command::cargo_bin("overlap")
        .unwrap()
        .args(["--store", store])
        .args(args)
        .output()
        .expect("overlap should run");
    assert!(
        output.status.success(),
        "overlap {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be UTF-8")
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregation from a records file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn common_from_file_applies_newest_override() {
    Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "-i", records_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Participants (2 people): alice, bob"))
        .stdout(predicate::str::contains("2024-06-03 to 2024-06-04 (2 days)"))
        .stdout(predicate::str::contains("2024-06-06 to 2024-06-10 (5 days)"));
}

#[test]
fn common_json_output_is_structured() {
    let output = Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "--json", "-i", records_json_path()])
        .output()
        .expect("common should run");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("common --json must print JSON");
    assert_eq!(value["participants"], serde_json::json!(["alice", "bob"]));
    assert_eq!(value["ranges"].as_array().unwrap().len(), 2);
    assert_eq!(value["ranges"][0]["start_date"], "2024-06-03");
    assert_eq!(value["ranges"][0]["end_date"], "2024-06-04");
}

#[test]
fn supplied_order_lets_the_last_listed_record_win() {
    // The fixture lists the oldest record last, so the override is undone.
    Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "--order", "supplied", "-i", records_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-03 to 2024-06-10 (8 days)"));
}

#[test]
fn common_from_stdin() {
    let input = r#"[
        {"id":"1","person_id":"alice","start_date":"2024-06-01","end_date":"2024-06-05"},
        {"id":"2","person_id":"bob","start_date":"2024-06-04","end_date":"2024-06-07"}
    ]"#;

    Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "-i", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-04 to 2024-06-05 (2 days)"));
}

#[test]
fn common_with_explicit_roster_counts_silent_members() {
    Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "--roster", "alice,bob,carol", "-i", records_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Participants (3 people)"))
        .stdout(predicate::str::contains("No common dates found."));
}

#[test]
fn common_with_subset_roster_ignores_non_members() {
    // bob is outside the roster; his records must not split alice and carol.
    let input = r#"[
        {"id":"1","person_id":"alice","start_date":"2024-06-01","end_date":"2024-06-05"},
        {"id":"2","person_id":"carol","start_date":"2024-06-02","end_date":"2024-06-06"},
        {"id":"3","person_id":"bob","start_date":"2024-06-03","end_date":"2024-06-03"}
    ]"#;

    let output = Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "--json", "--roster", "alice,carol", "-i", "-"])
        .write_stdin(input)
        .output()
        .expect("common should run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["participants"], serde_json::json!(["alice", "carol"]));
    assert_eq!(
        value["ranges"],
        serde_json::json!([{"start_date": "2024-06-02", "end_date": "2024-06-05"}])
    );

    // Every day flagged as full headcount lies inside the reported range.
    for day in value["days"].as_array().unwrap() {
        let full = day["available"] == day["total"];
        let date = day["date"].as_str().unwrap();
        let inside = ("2024-06-02"..="2024-06-05").contains(&date);
        assert_eq!(full, inside, "day {date}");
    }
}

#[test]
fn common_with_no_overlap_says_so() {
    let input = r#"[
        {"id":"1","person_id":"alice","start_date":"2024-06-01","end_date":"2024-06-03"},
        {"id":"2","person_id":"bob","start_date":"2024-06-04","end_date":"2024-06-06"}
    ]"#;

    Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "-i", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No common dates found."));
}

#[test]
fn presence_json_lists_people_per_day() {
    let output = Command::cargo_bin("overlap")
        .unwrap()
        .args(["presence", "--json", "-i", records_json_path()])
        .output()
        .expect("presence should run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["2024-06-01"], serde_json::json!(["alice"]));
    assert_eq!(value["2024-06-04"], serde_json::json!(["alice", "bob"]));
    assert_eq!(value["2024-06-05"], serde_json::json!(["bob"]));
    assert_eq!(value["2024-06-12"], serde_json::json!(["bob"]));
}

#[test]
fn reversed_range_in_input_is_reported() {
    let input = r#"[{"id":"bad1","person_id":"alice","start_date":"2024-06-05","end_date":"2024-06-01"}]"#;

    Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "-i", "-"])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse availability records"))
        .stderr(predicate::str::contains("bad1"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("overlap")
        .unwrap()
        .args(["common", "-i", "/tmp/nonexistent-overlap-input-12345.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Store workflow
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_store_has_no_data_yet() {
    let store = fresh_store("empty");
    let out = run(&store, &["common"]);
    assert!(out.contains("No availability recorded yet."));
    let out = run(&store, &["list"]);
    assert!(out.contains("No availability recorded yet."));
}

#[test]
fn add_then_common_from_store() {
    let store = fresh_store("add-common");

    run(&store, &["add", "--person", "alice", "--start", "2024-06-01", "--end", "2024-06-05"]);
    run(&store, &["add", "--person", "bob", "--start", "2024-06-03", "--end", "2024-06-07"]);

    let out = run(&store, &["common"]);
    assert!(out.contains("2024-06-03 to 2024-06-05 (3 days)"), "got: {out}");

    let _ = std::fs::remove_file(&store);
}

#[test]
fn unavailable_override_through_store() {
    let store = fresh_store("override");

    run(&store, &["add", "--person", "alice", "--start", "2024-06-01", "--end", "2024-06-10"]);
    run(
        &store,
        &["add", "--person", "alice", "--start", "2024-06-05", "--end", "2024-06-05", "--unavailable"],
    );

    let out = run(&store, &["common"]);
    assert!(out.contains("2024-06-01 to 2024-06-04"), "got: {out}");
    assert!(out.contains("2024-06-06 to 2024-06-10"), "got: {out}");

    let _ = std::fs::remove_file(&store);
}

#[test]
fn list_and_delete_round_trip_through_store() {
    let store = fresh_store("delete");

    let id = run(&store, &["add", "--person", "alice", "--start", "2024-06-01", "--end", "2024-06-02"]);
    let id = id.trim().to_string();
    assert!(!id.is_empty(), "add should print the new id");

    let listed: serde_json::Value = serde_json::from_str(&run(&store, &["list", "--json"])).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());
    assert_eq!(listed[0]["person_id"], "alice");

    run(&store, &["delete", &id]);
    let listed: serde_json::Value = serde_json::from_str(&run(&store, &["list", "--json"])).unwrap();
    assert!(listed.as_array().unwrap().is_empty());

    let _ = std::fs::remove_file(&store);
}

#[test]
fn delete_unknown_id_fails() {
    let store = fresh_store("delete-unknown");

    Command::cargo_bin("overlap")
        .unwrap()
        .args(["--store", &store, "delete", "no-such-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found"));
}

#[test]
fn set_replaces_a_persons_days() {
    let store = fresh_store("set");

    run(&store, &["add", "--person", "bob", "--start", "2024-07-01", "--end", "2024-07-31"]);
    let out = run(&store, &["set", "--person", "alice", "2024-06-02", "2024-06-01", "2024-06-04"]);
    assert_eq!(out.lines().count(), 2, "two runs expected, got: {out}");

    let listed: serde_json::Value = serde_json::from_str(&run(&store, &["list", "--json"])).unwrap();
    let mut spans: Vec<(String, String)> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["start_date"].as_str().unwrap().to_string(),
                r["end_date"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    spans.sort();
    assert_eq!(
        spans,
        vec![
            ("2024-06-01".to_string(), "2024-06-02".to_string()),
            ("2024-06-04".to_string(), "2024-06-04".to_string()),
        ]
    );

    let _ = std::fs::remove_file(&store);
}

#[test]
fn store_rewrites_leave_no_temp_file_behind() {
    let store = fresh_store("atomic");
    let tmp = format!("{}.tmp", store);

    run(&store, &["add", "--person", "bob", "--start", "2024-07-01", "--end", "2024-07-31"]);
    run(&store, &["set", "--person", "alice", "2024-06-01", "2024-06-02", "2024-06-03"]);

    assert!(!std::path::Path::new(&tmp).exists(), "temp file should be renamed away");
    let raw = std::fs::read_to_string(&store).expect("store file must exist");
    let rows: serde_json::Value = serde_json::from_str(&raw).expect("store must be valid JSON");
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let _ = std::fs::remove_file(&store);
}

#[test]
fn store_path_can_come_from_environment() {
    let store = fresh_store("env");

    Command::cargo_bin("overlap")
        .unwrap()
        .env("OVERLAP_STORE", &store)
        .args(["add", "--person", "alice", "--start", "2024-06-01", "--end", "2024-06-01"])
        .assert()
        .success();

    assert!(std::path::Path::new(&store).exists(), "store file should be created");
    let _ = std::fs::remove_file(&store);
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument errors and help
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn add_rejects_malformed_date() {
    let store = fresh_store("bad-date");

    Command::cargo_bin("overlap")
        .unwrap()
        .args(["--store", &store, "add", "--person", "alice", "--start", "June 1", "--end", "2024-06-02"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --start"));
}

#[test]
fn add_rejects_reversed_range() {
    let store = fresh_store("reversed");

    Command::cargo_bin("overlap")
        .unwrap()
        .args(["--store", &store, "add", "--person", "alice", "--start", "2024-06-05", "--end", "2024-06-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid range"));

    assert!(!std::path::Path::new(&store).exists(), "nothing should be written");
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("overlap")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("common"))
        .stdout(predicate::str::contains("presence"))
        .stdout(predicate::str::contains("add"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("overlap")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}
