// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `queuectl worker` specs

use crate::prelude::*;
use std::io::Read;
use std::time::Duration;

#[test]
fn worker_rejects_zero_interval() {
    let temp = Project::empty();
    temp.qc().args(&["worker", "--interval", "0"]).fails().stderr_has("--interval");
}

#[cfg(unix)]
#[test]
fn worker_processes_jobs_until_interrupted() {
    let temp = Project::empty();
    temp.enqueue("job1", "echo Hello");
    temp.enqueue("fail1", "exit 1");

    let mut child = temp
        .qc()
        .env("QUEUECTL_POLL_INTERVAL_MS", "100")
        .args(&["worker"])
        .spawn();

    let settled = temp.wait_for_jobs(Duration::from_secs(20), |jobs| {
        jobs["job1"]["state"] == "completed" && jobs["fail1"]["state"] == "dead"
    });

    let status = std::process::Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("failed to send SIGINT");
    assert!(status.success());
    let exit = child.wait().expect("worker did not exit");
    let mut stdout = String::new();
    if let Some(mut out) = child.stdout.take() {
        out.read_to_string(&mut stdout).expect("failed to read worker stdout");
    }

    assert!(settled, "jobs never settled\n{stdout}");
    assert!(exit.success(), "worker exited with {exit:?}\n{stdout}");
    assert!(stdout.contains("Worker started"), "{stdout}");
    assert!(stdout.contains("Job job1 completed successfully."), "{stdout}");
    assert!(stdout.contains("Job fail1 permanently failed after 3 attempts"), "{stdout}");
    assert!(stdout.trim_end().ends_with("Worker stopped."), "{stdout}");
    assert_eq!(temp.jobs()["fail1"]["attempts"], 3);
}

#[cfg(unix)]
#[test]
fn ctrl_c_lets_the_running_job_finish() {
    let temp = Project::empty();
    temp.enqueue("slow", "sleep 2; true");

    let mut child = temp
        .qc()
        .env("QUEUECTL_POLL_INTERVAL_MS", "100")
        .args(&["worker"])
        .own_process_group()
        .spawn();

    let running =
        temp.wait_for_jobs(Duration::from_secs(10), |jobs| jobs["slow"]["state"] == "processing");
    // Negative pid: signal every process in the worker's group
    let status = std::process::Command::new("kill")
        .args(["-INT", "--", &format!("-{}", child.id())])
        .status()
        .expect("failed to send SIGINT");
    assert!(status.success());
    let exit = child.wait().expect("worker did not exit");
    let mut stdout = String::new();
    if let Some(mut out) = child.stdout.take() {
        out.read_to_string(&mut stdout).expect("failed to read worker stdout");
    }

    assert!(running, "job never started\n{stdout}");
    assert!(exit.success(), "worker exited with {exit:?}\n{stdout}");
    assert!(stdout.contains("Job slow completed successfully."), "{stdout}");
    assert!(stdout.trim_end().ends_with("Worker stopped."), "{stdout}");
    let job = &temp.jobs()["slow"];
    assert_eq!(job["state"], "completed");
    assert_eq!(job["attempts"], 0);
}

#[cfg(unix)]
#[test]
fn worker_fails_fast_on_corrupt_store() {
    let temp = Project::empty();
    temp.file("jobs.json", "garbage");

    let mut child = temp.qc().args(&["worker", "--interval", "1"]).spawn();
    let exit = child.wait().expect("worker did not exit");

    assert_eq!(exit.code(), Some(2));
}
