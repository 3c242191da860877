// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `queuectl status` specs

use crate::prelude::*;

#[test]
fn status_of_empty_queue() {
    let temp = Project::empty();

    temp.qc().args(&["status"]).passes().stdout_eq(
        "Total jobs: 0\n\nSummary:\n  pending: 0\n  processing: 0\n  completed: 0\n  failed: 0\n  dead: 0\n",
    );
}

#[test]
fn completed_and_dead_after_three_runs() {
    let temp = Project::empty();
    temp.qc().args(&["enqueue", r#"{"id":"job1","command":"echo Hello"}"#]).passes();
    temp.qc().args(&["enqueue", r#"{"id":"fail1","command":"exit 1"}"#]).passes();

    for _ in 0..3 {
        temp.qc().args(&["run"]).passes();
    }

    temp.qc()
        .args(&["status"])
        .passes()
        .stdout_has("Total jobs: 2")
        .stdout_has("pending: 0")
        .stdout_has("completed: 1")
        .stdout_has("dead: 1");
}

#[test]
fn status_table_shows_each_job() {
    let temp = Project::empty();
    temp.enqueue("job1", "echo Hello");

    let out = temp.qc().args(&["status"]).passes();

    let lines: Vec<&str> = out.stdout().lines().collect();
    assert!(lines[1].starts_with("ID "), "{}", out.stdout());
    assert!(lines[2].starts_with("job1"), "{}", out.stdout());
    assert!(lines[2].contains("pending"));
    assert!(lines[2].ends_with("echo Hello"));
}

#[test]
fn status_state_filter() {
    let temp = Project::empty();
    temp.enqueue("job1", "true");
    temp.enqueue("fail1", "exit 1");
    temp.qc().args(&["run"]).passes();

    temp.qc()
        .args(&["status", "--state", "completed"])
        .passes()
        .stdout_has("Total jobs: 1")
        .stdout_has("job1")
        .stdout_lacks("fail1");
}

#[test]
fn status_json_output() {
    let temp = Project::empty();
    temp.enqueue("job1", "true");

    let out = temp.qc().args(&["status", "-o", "json"]).passes();

    let value: Value = serde_json::from_str(out.stdout()).expect("status json");
    assert_eq!(value["total"], 1);
    assert_eq!(value["jobs"][0]["id"], "job1");
    assert_eq!(value["summary"]["pending"], 1);
    assert_eq!(value["summary"]["dead"], 0);
}

#[test]
fn status_does_not_create_a_store() {
    let temp = Project::empty();
    temp.qc().args(&["status"]).passes();
    assert!(!temp.store_path().exists());
}

#[test]
fn corrupt_store_is_reported_not_replaced() {
    let temp = Project::empty();
    temp.file("jobs.json", "{\"job1\": {\"command\": ");

    temp.qc()
        .args(&["status"])
        .fails_with(2)
        .stderr_has("is corrupt");

    assert_eq!(temp.read("jobs.json"), "{\"job1\": {\"command\": ");
}
