// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending-job processing: single rounds and the polling worker loop.

use crate::error::SchedulerError;
use crate::executor::{Executor, Outcome};
use crate::progress::Progress;
use qc_core::{Clock, Job, JobId, JobState, RetryPolicy};
use qc_storage::{JobRepository, RepositoryError, Store};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Default delay between polling rounds.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerConfig {
    pub poll_interval: Duration,
    /// Stop after this many polling rounds (unbounded when `None`)
    pub max_cycles: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { poll_interval: DEFAULT_POLL_INTERVAL, max_cycles: None }
    }
}

impl WorkerConfig {
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn max_cycles(mut self, cycles: u64) -> Self {
        self.max_cycles = Some(cycles);
        self
    }
}

/// What happened to one job during a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobReport {
    Completed { id: JobId },
    Retrying { id: JobId, attempts: u32 },
    Dead { id: JobId, attempts: u32 },
    Errored { id: JobId, error: String },
}

impl JobReport {
    pub fn id(&self) -> &JobId {
        match self {
            JobReport::Completed { id }
            | JobReport::Retrying { id, .. }
            | JobReport::Dead { id, .. }
            | JobReport::Errored { id, .. } => id,
        }
    }
}

/// Result of one pass over the pending jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub jobs: Vec<JobReport>,
    /// Cancellation arrived before every pending job was processed
    pub cancelled: bool,
}

impl RunReport {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn completed(&self) -> usize {
        self.jobs.iter().filter(|j| matches!(j, JobReport::Completed { .. })).count()
    }

    pub fn retrying(&self) -> usize {
        self.jobs.iter().filter(|j| matches!(j, JobReport::Retrying { .. })).count()
    }

    pub fn dead(&self) -> usize {
        self.jobs.iter().filter(|j| matches!(j, JobReport::Dead { .. })).count()
    }

    pub fn errored(&self) -> usize {
        self.jobs.iter().filter(|j| matches!(j, JobReport::Errored { .. })).count()
    }
}

/// Totals over a worker's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub cycles: u64,
    pub completed: usize,
    pub retried: usize,
    pub dead: usize,
    pub errored: usize,
    /// Rounds that failed before any job ran
    pub failed_cycles: u64,
}

impl WorkerSummary {
    fn absorb(&mut self, report: &RunReport) {
        self.completed += report.completed();
        self.retried += report.retrying();
        self.dead += report.dead();
        self.errored += report.errored();
    }
}

/// Drives pending jobs through execution and retry bookkeeping.
///
/// Jobs run one at a time. Claiming, completing and recording a failure are
/// each one repository write, so an interrupted cycle leaves the last
/// persisted state intact and never strands a job in `failed`.
pub struct Scheduler<S, C, E> {
    repo: JobRepository<S, C>,
    executor: E,
    retry: RetryPolicy,
    config: WorkerConfig,
    progress: Option<UnboundedSender<Progress>>,
}

impl<S: Store, C: Clock, E: Executor> Scheduler<S, C, E> {
    pub fn new(repo: JobRepository<S, C>, executor: E) -> Self {
        Self {
            repo,
            executor,
            retry: RetryPolicy::default(),
            config: WorkerConfig::default(),
            progress: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_config(mut self, config: WorkerConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish [`Progress`] events to `tx`.
    pub fn with_progress(mut self, tx: UnboundedSender<Progress>) -> Self {
        self.progress = Some(tx);
        self
    }

    pub fn repository(&self) -> &JobRepository<S, C> {
        &self.repo
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Process every job that is pending right now, then return.
    ///
    /// Jobs sent back to pending during this round wait for the next one.
    pub async fn run_once(&self) -> Result<RunReport, SchedulerError> {
        self.run_pending(None).await
    }

    /// Poll for pending jobs until `cancel` fires (or `max_cycles` rounds ran).
    ///
    /// Cancellation is honoured between rounds and between jobs, never while a
    /// command is running. A corrupt store ends the worker with an error; other
    /// round failures are logged and retried on the next poll.
    pub async fn worker(&self, cancel: CancellationToken) -> Result<WorkerSummary, SchedulerError> {
        self.report_orphans()?;
        tracing::info!(
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            max_retries = self.retry.max_retries,
            "worker started"
        );
        self.emit(Progress::WorkerStarted { poll_interval: self.config.poll_interval });

        let mut summary = WorkerSummary::default();
        while !cancel.is_cancelled() {
            match self.run_pending(Some(&cancel)).await {
                Ok(report) => {
                    if report.is_empty() && !report.cancelled {
                        self.emit(Progress::Idle);
                    }
                    summary.absorb(&report);
                }
                Err(e) if e.is_corruption() => {
                    tracing::error!(error = %e, "job store is corrupt, stopping worker");
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, "polling round failed");
                    summary.failed_cycles += 1;
                }
            }
            summary.cycles += 1;

            if self.config.max_cycles.is_some_and(|max| summary.cycles >= max) {
                break;
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }

        tracing::info!(
            cycles = summary.cycles,
            completed = summary.completed,
            dead = summary.dead,
            "worker stopped"
        );
        self.emit(Progress::WorkerStopped);
        Ok(summary)
    }

    async fn run_pending(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<RunReport, SchedulerError> {
        let pending = self.repo.list_by_state(JobState::Pending)?;
        tracing::debug!(count = pending.len(), "pending jobs fetched");

        let mut report = RunReport::default();
        for job in pending {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                tracing::info!("cancelled, leaving remaining jobs pending");
                report.cancelled = true;
                break;
            }
            match self.process(&job).await {
                Ok(result) => report.jobs.push(result),
                Err(e) if e.is_corruption() => return Err(e.into()),
                Err(e) => {
                    tracing::error!(job_id = %job.id, error = %e, "job processing failed");
                    self.emit(Progress::Errored { id: job.id.clone(), error: e.to_string() });
                    report.jobs.push(JobReport::Errored { id: job.id, error: e.to_string() });
                }
            }
        }
        Ok(report)
    }

    /// One full cycle for a pending job: claim, execute, record the outcome.
    async fn process(&self, job: &Job) -> Result<JobReport, RepositoryError> {
        let claimed = self.repo.update(&job.id, JobState::Processing, 0)?;
        self.emit(Progress::Started { id: claimed.id.clone(), command: claimed.command.clone() });

        let started = self.repo.clock().now();
        let outcome = self.executor.execute(&claimed).await;
        let elapsed_ms = self.repo.clock().now().duration_since(started).as_millis() as u64;

        let reason = match outcome {
            Outcome::Success => {
                self.repo.update(&claimed.id, JobState::Completed, 0)?;
                tracing::info!(job_id = %claimed.id, elapsed_ms, "job completed");
                self.emit(Progress::Completed { id: claimed.id.clone() });
                return Ok(JobReport::Completed { id: claimed.id });
            }
            Outcome::Failure(reason) => reason.to_string(),
        };
        tracing::debug!(job_id = %claimed.id, elapsed_ms, "attempt failed");

        let settled = self.repo.record_failure(&claimed.id, reason.clone(), &self.retry)?;

        if settled.is_terminal() {
            tracing::warn!(
                job_id = %settled.id,
                attempts = settled.attempts,
                error = %reason,
                "job is dead"
            );
            self.emit(Progress::Dead {
                id: settled.id.clone(),
                attempts: settled.attempts,
                reason,
            });
            Ok(JobReport::Dead { id: settled.id, attempts: settled.attempts })
        } else {
            tracing::info!(
                job_id = %settled.id,
                attempts = settled.attempts,
                error = %reason,
                "job failed, will retry"
            );
            self.emit(Progress::Retrying {
                id: settled.id.clone(),
                attempts: settled.attempts,
                max_retries: self.retry.max_retries,
                reason,
            });
            Ok(JobReport::Retrying { id: settled.id, attempts: settled.attempts })
        }
    }

    /// Warn about jobs a previous worker left in `processing`.
    fn report_orphans(&self) -> Result<(), SchedulerError> {
        for job in self.repo.list_by_state(JobState::Processing)? {
            tracing::warn!(job_id = %job.id, updated_at = %job.updated_at, "job left in processing");
            self.emit(Progress::Orphaned { id: job.id });
        }
        Ok(())
    }

    fn emit(&self, progress: Progress) {
        if let Some(tx) = &self.progress {
            // Receiver gone means nobody is watching
            let _ = tx.send(progress);
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
