// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running a job's command.

use async_trait::async_trait;
use qc_core::Job;
use std::fmt;
use std::time::Duration;

/// Result of one execution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(FailureReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Why an attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Command ran and exited non-zero (`None` when killed by a signal)
    Exit { code: Option<i32>, stderr: String },
    /// Command could not be started
    Launch(String),
    /// Command outlived the configured timeout and was killed
    Timeout(Duration),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Exit { code: Some(code), stderr } if !stderr.trim().is_empty() => {
                write!(f, "exit status {code}: {}", stderr.trim())
            }
            FailureReason::Exit { code: Some(code), .. } => write!(f, "exit status {code}"),
            FailureReason::Exit { code: None, .. } => write!(f, "terminated by signal"),
            FailureReason::Launch(msg) => write!(f, "failed to launch: {msg}"),
            FailureReason::Timeout(after) if after.subsec_millis() == 0 => {
                write!(f, "timed out after {}s", after.as_secs())
            }
            FailureReason::Timeout(after) => write!(f, "timed out after {}ms", after.as_millis()),
        }
    }
}

/// Runs a job's command and reports how it went. Never mutates the job.
#[async_trait]
pub trait Executor: Send + Sync + 'static {
    async fn execute(&self, job: &Job) -> Outcome;
}

/// Executes commands with `sh -c`.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    timeout: Option<Duration>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Executor for ShellExecutor {
    async fn execute(&self, job: &Job) -> Outcome {
        tracing::info!(job_id = %job.id, command = %job.command, "running job command");

        let mut cmd = tokio::process::Command::new("sh");
        cmd.arg("-c")
            .arg(&job.command)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);
        // Keep the terminal's Ctrl+C away from the command; stopping the
        // worker must not fail the job it is running
        #[cfg(unix)]
        cmd.process_group(0);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::error!(job_id = %job.id, error = %e, "job command failed to launch");
                return Outcome::Failure(FailureReason::Launch(e.to_string()));
            }
        };

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(result) => result,
                Err(_) => {
                    // Dropping the wait future kills the child
                    tracing::warn!(
                        job_id = %job.id,
                        timeout_ms = limit.as_millis() as u64,
                        "job command timed out"
                    );
                    return Outcome::Failure(FailureReason::Timeout(limit));
                }
            },
            None => child.wait_with_output().await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(job_id = %job.id, error = %e, "job command execution failed");
                return Outcome::Failure(FailureReason::Launch(e.to_string()));
            }
        };

        if !output.stdout.is_empty() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            tracing::info!(job_id = %job.id, stdout = %stdout, "job stdout");
        }
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.is_empty() {
            tracing::warn!(job_id = %job.id, stderr = %stderr, "job stderr");
        }

        if output.status.success() {
            Outcome::Success
        } else {
            let code = output.status.code();
            tracing::info!(job_id = %job.id, exit_code = ?code, "job command exited non-zero");
            Outcome::Failure(FailureReason::Exit { code, stderr })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{Executor, FailureReason, Outcome};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use qc_core::{Job, JobId};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Arc;

    /// Recorded execution
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ExecuteCall {
        pub id: JobId,
        pub command: String,
    }

    #[derive(Default)]
    struct FakeExecutorState {
        scripted: HashMap<JobId, VecDeque<Outcome>>,
        calls: Vec<ExecuteCall>,
    }

    /// Fake executor for testing.
    ///
    /// Returns scripted outcomes per job id in order; once a job's script
    /// runs out, it succeeds.
    #[derive(Clone, Default)]
    pub struct FakeExecutor {
        inner: Arc<Mutex<FakeExecutorState>>,
    }

    impl FakeExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue outcomes for a job's next executions.
        pub fn script(&self, id: &str, outcomes: impl IntoIterator<Item = Outcome>) -> &Self {
            self.inner.lock().scripted.entry(JobId::new(id)).or_default().extend(outcomes);
            self
        }

        /// Make a job fail with exit status 1 on its next `times` executions.
        pub fn fail(&self, id: &str, times: usize) -> &Self {
            let failure =
                Outcome::Failure(FailureReason::Exit { code: Some(1), stderr: String::new() });
            self.script(id, vec![failure; times])
        }

        /// Get all recorded executions
        pub fn calls(&self) -> Vec<ExecuteCall> {
            self.inner.lock().calls.clone()
        }

        pub fn call_count(&self, id: &str) -> usize {
            self.inner.lock().calls.iter().filter(|c| c.id == id).count()
        }
    }

    #[async_trait]
    impl Executor for FakeExecutor {
        async fn execute(&self, job: &Job) -> Outcome {
            let mut inner = self.inner.lock();
            inner.calls.push(ExecuteCall { id: job.id.clone(), command: job.command.clone() });
            inner
                .scripted
                .get_mut(&job.id)
                .and_then(VecDeque::pop_front)
                .unwrap_or(Outcome::Success)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ExecuteCall, FakeExecutor};

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
