// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file and environment specs

use crate::prelude::*;

#[test]
fn config_file_sets_max_retries() {
    let temp = Project::empty();
    temp.file("config.toml", "max_retries = 1\n");
    temp.enqueue("fail1", "exit 1");

    temp.qc().args(&["run"]).passes().stdout_has("permanently failed after 1 attempts");

    assert_eq!(temp.jobs()["fail1"]["state"], "dead");
}

#[test]
fn env_overrides_config_file() {
    let temp = Project::empty();
    temp.file("config.toml", "max_retries = 1\n");
    temp.enqueue("fail1", "exit 1");

    temp.qc().env("QUEUECTL_MAX_RETRIES", "2").args(&["run"]).passes();

    assert_eq!(temp.jobs()["fail1"]["state"], "pending");
}

#[test]
fn zero_max_retries_is_a_config_error() {
    let temp = Project::empty();
    temp.file("config.toml", "max_retries = 0\n");

    temp.qc().args(&["status"]).fails_with(1).stderr_has("max_retries must be at least 1");
}

#[test]
fn malformed_config_file_is_reported() {
    let temp = Project::empty();
    temp.file("config.toml", "max_retries = \"many\"\n");

    temp.qc().args(&["status"]).fails_with(1).stderr_has("invalid config");
}

#[test]
fn store_path_can_point_elsewhere() {
    let temp = Project::empty();
    temp.file("config.toml", "store_path = \"data/queue.json\"\n");

    temp.enqueue("job1", "true");

    assert!(temp.path().join("data/queue.json").exists());
    assert!(!temp.store_path().exists());
}

#[test]
fn command_timeout_fails_slow_jobs() {
    let temp = Project::empty();
    temp.enqueue("slow", "sleep 5");

    temp.qc()
        .env("QUEUECTL_COMMAND_TIMEOUT_MS", "200")
        .args(&["run"])
        .passes()
        .stdout_has("Job slow failed (attempt 1/3): timed out after 200ms");

    let jobs = temp.jobs();
    assert_eq!(jobs["slow"]["attempts"], 1);
    assert_eq!(jobs["slow"]["last_error"], "timed out after 200ms");
}

#[test]
fn diagnostics_go_to_the_log_file() {
    let temp = Project::empty();
    temp.enqueue("job1", "echo Hello");

    temp.qc().args(&["run"]).passes().stdout_lacks("INFO");

    let log = temp.read("queuectl.log");
    assert!(log.contains("job enqueued"), "{log}");
    assert!(log.contains("job_id=job1"), "{log}");
}
