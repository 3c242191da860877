// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `queuectl run` specs

use crate::prelude::*;

#[test]
fn run_with_empty_queue() {
    let temp = Project::empty();
    temp.qc().args(&["run"]).passes().stdout_eq("No pending jobs to run.\n");
}

#[test]
fn successful_job_completes() {
    let temp = Project::empty();
    temp.enqueue("job1", "echo Hello");

    temp.qc()
        .args(&["run"])
        .passes()
        .stdout_eq("Running job job1: echo Hello\nJob job1 completed successfully.\n");

    let job = &temp.jobs()["job1"];
    assert_eq!(job["state"], "completed");
    assert_eq!(job["attempts"], 0);
}

#[test]
fn command_output_is_not_echoed_to_stdout() {
    let temp = Project::empty();
    temp.enqueue("job1", "echo from-the-job");

    temp.qc().args(&["run"]).passes().stdout_lacks("from-the-job");
}

#[test]
fn failing_job_is_dead_after_three_runs() {
    let temp = Project::empty();
    temp.enqueue("fail1", "echo nope >&2; exit 1");

    temp.qc()
        .args(&["run"])
        .passes()
        .stdout_has("Job fail1 failed (attempt 1/3): exit status 1: nope. Retrying later...");
    assert_eq!(temp.jobs()["fail1"]["state"], "pending");

    temp.qc().args(&["run"]).passes().stdout_has("attempt 2/3");
    temp.qc()
        .args(&["run"])
        .passes()
        .stdout_has("Job fail1 permanently failed after 3 attempts: exit status 1: nope");

    let job = &temp.jobs()["fail1"];
    assert_eq!(job["state"], "dead");
    assert_eq!(job["attempts"], 3);
    assert_eq!(job["last_error"], "exit status 1: nope");

    // Dead jobs are left alone
    temp.qc().args(&["run"]).passes().stdout_eq("No pending jobs to run.\n");
    assert_eq!(temp.jobs()["fail1"]["attempts"], 3);
}

#[test]
fn job_that_recovers_keeps_its_attempt_count() {
    let temp = Project::empty();
    // Fails until it has been tried twice
    let marker = temp.path().join("tries");
    let command = format!(
        "echo x >> '{0}'; test $(wc -l < '{0}') -ge 3",
        marker.display()
    );
    temp.enqueue("flaky", &command);

    for _ in 0..3 {
        temp.qc().args(&["run"]).passes();
    }

    let job = &temp.jobs()["flaky"];
    assert_eq!(job["state"], "completed");
    assert_eq!(job["attempts"], 2);
    assert!(job.get("last_error").is_none(), "{job}");
}

#[test]
fn run_processes_jobs_in_insertion_order() {
    let temp = Project::empty();
    temp.enqueue("b", "true");
    temp.enqueue("a", "true");

    let out = temp.qc().args(&["run"]).passes();

    let started: Vec<&str> =
        out.stdout().lines().filter(|l| l.starts_with("Running job")).collect();
    assert_eq!(started, vec!["Running job b: true", "Running job a: true"]);
}

#[test]
fn run_on_corrupt_store_fails_with_code_2() {
    let temp = Project::empty();
    temp.file("jobs.json", "[1, 2");

    temp.qc().args(&["run"]).fails_with(2).stderr_has("corrupt");

    assert_eq!(temp.read("jobs.json"), "[1, 2");
}
