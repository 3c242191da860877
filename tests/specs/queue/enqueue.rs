// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `queuectl enqueue` specs

use crate::prelude::*;

#[test]
fn enqueue_json_payload() {
    let temp = Project::empty();

    temp.qc()
        .args(&["enqueue", r#"{"id":"job1","command":"echo Hello"}"#])
        .passes()
        .stdout_eq("Job enqueued: id=job1, command=echo Hello\n");

    let job = &temp.jobs()["job1"];
    assert_eq!(job["command"], "echo Hello");
    assert_eq!(job["state"], "pending");
    assert_eq!(job["attempts"], 0);
    assert!(job["updated_at"].as_str().is_some_and(|t| t.ends_with('Z')), "{job}");
}

#[test]
fn enqueue_with_flags_and_generated_id() {
    let temp = Project::empty();

    let out = temp.qc().args(&["enqueue", "--command", "true"]).passes();

    assert!(out.stdout().starts_with("Job enqueued: id=job-"), "{}", out.stdout());
    let jobs = temp.jobs();
    assert_eq!(jobs.as_object().map(|m| m.len()), Some(1));
}

#[test]
fn store_keeps_insertion_order() {
    let temp = Project::empty();
    for id in ["zeta", "alpha", "mid"] {
        temp.enqueue(id, "true");
    }

    let ids: Vec<String> = temp
        .jobs()
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();

    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn duplicate_id_is_rejected_without_changes() {
    let temp = Project::empty();
    temp.enqueue("job1", "echo Hello");
    let before = temp.read("jobs.json");

    temp.qc()
        .args(&["enqueue", r#"{"id":"job1","command":"echo Other"}"#])
        .fails_with(1)
        .stderr_has("job 'job1' already exists");

    assert_eq!(temp.read("jobs.json"), before);
}

#[test]
fn invalid_json_is_rejected() {
    let temp = Project::empty();

    temp.qc().args(&["enqueue", "{id: job1"]).fails_with(1).stderr_has("invalid job JSON");

    assert!(!temp.store_path().exists());
}

#[test]
fn missing_command_is_rejected() {
    let temp = Project::empty();
    temp.qc().args(&["enqueue", r#"{"id":"job1"}"#]).fails_with(1).stderr_has("command");
}

#[test]
fn empty_command_is_rejected() {
    let temp = Project::empty();
    temp.qc()
        .args(&["enqueue", r#"{"id":"job1","command":"   "}"#])
        .fails_with(1)
        .stderr_has("command must not be empty");
}

#[test]
fn unknown_fields_are_rejected() {
    let temp = Project::empty();
    temp.qc()
        .args(&["enqueue", r#"{"id":"job1","command":"true","state":"completed"}"#])
        .fails_with(1)
        .stderr_has("unknown field `state`");
}

#[test]
fn enqueue_into_corrupt_store_fails_with_code_2() {
    let temp = Project::empty();
    temp.file("jobs.json", "{not json");

    temp.qc().args(&["enqueue", "--id", "job1", "--command", "true"]).fails_with(2);

    assert_eq!(temp.read("jobs.json"), "{not json");
}
