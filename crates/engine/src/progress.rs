// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use qc_core::JobId;
use std::fmt;
use std::time::Duration;

/// Scheduler progress, published for whoever is watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    WorkerStarted { poll_interval: Duration },
    WorkerStopped,
    /// A job was found in `processing` when the worker started
    Orphaned { id: JobId },
    /// A polling round found nothing to do
    Idle,
    Started { id: JobId, command: String },
    Completed { id: JobId },
    Retrying { id: JobId, attempts: u32, max_retries: u32, reason: String },
    Dead { id: JobId, attempts: u32, reason: String },
    /// Bookkeeping for a job failed; the job may be left mid-cycle
    Errored { id: JobId, error: String },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::WorkerStarted { poll_interval } => write!(
                f,
                "Worker started, polling every {}. Press Ctrl+C to stop.",
                qc_core::format_elapsed_ms(poll_interval.as_millis() as u64)
            ),
            Progress::WorkerStopped => write!(f, "Worker stopped."),
            Progress::Orphaned { id } => {
                write!(f, "Job {id} was left in processing by an earlier run; not touching it.")
            }
            Progress::Idle => write!(f, "No pending jobs. Waiting..."),
            Progress::Started { id, command } => write!(f, "Running job {id}: {command}"),
            Progress::Completed { id } => write!(f, "Job {id} completed successfully."),
            Progress::Retrying { id, attempts, max_retries, reason } => write!(
                f,
                "Job {id} failed (attempt {attempts}/{max_retries}): {reason}. Retrying later..."
            ),
            Progress::Dead { id, attempts, reason } => {
                write!(f, "Job {id} permanently failed after {attempts} attempts: {reason}")
            }
            Progress::Errored { id, error } => write!(f, "Error processing job {id}: {error}"),
        }
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
