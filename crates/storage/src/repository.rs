// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed job operations over a [`Store`].

use crate::error::RepositoryError;
use crate::record::JobSet;
use crate::store::Store;
use qc_core::{Clock, Job, JobId, JobState, JobSummary, RetryPolicy, SystemClock};

/// One state transition to apply to a stored job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobUpdate {
    pub state: JobState,
    pub attempts_delta: u32,
    /// Recorded as the job's `last_error` when set
    pub error: Option<String>,
}

impl JobUpdate {
    pub fn to(state: JobState) -> Self {
        Self { state, attempts_delta: 0, error: None }
    }

    /// `processing -> failed`, counting one attempt.
    pub fn failed(error: impl Into<String>) -> Self {
        Self { state: JobState::Failed, attempts_delta: 1, error: Some(error.into()) }
    }
}

/// Job repository.
///
/// Every mutation takes the store lock, loads a fresh copy, applies the
/// change, and saves before releasing, so one call is one atomic
/// read-modify-write. Reads load without locking.
pub struct JobRepository<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: Store> JobRepository<S, SystemClock> {
    pub fn open(store: S) -> Self {
        Self::new(store, SystemClock)
    }
}

impl<S: Store, C: Clock> JobRepository<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Enqueue a new pending job.
    pub fn add(&self, id: JobId, command: &str) -> Result<Job, RepositoryError> {
        let job = Job::new(id, command, &self.clock)?;
        let _lock = self.store.lock()?;
        let mut jobs = self.store.load()?;
        if let Err(existing) = jobs.insert(job.clone()) {
            return Err(RepositoryError::DuplicateJob(existing.id));
        }
        self.store.save(&jobs)?;
        tracing::info!(job_id = %job.id, command = %job.command, "job enqueued");
        Ok(job)
    }

    pub fn get(&self, id: &str) -> Result<Job, RepositoryError> {
        self.store.load()?.get(id).cloned().ok_or_else(|| RepositoryError::NotFound(id.into()))
    }

    /// All jobs in insertion order.
    pub fn list_all(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.store.load()?.into_jobs())
    }

    /// Jobs in `state`, in insertion order.
    pub fn list_by_state(&self, state: JobState) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.store.load()?.into_jobs().into_iter().filter(|j| j.state == state).collect())
    }

    /// Move a job to `new_state`, adding `attempts_delta` failed attempts.
    pub fn update(
        &self,
        id: &str,
        new_state: JobState,
        attempts_delta: u32,
    ) -> Result<Job, RepositoryError> {
        self.update_with(id, JobUpdate { state: new_state, attempts_delta, error: None })
    }

    /// Apply a [`JobUpdate`] as one locked read-modify-write.
    pub fn update_with(&self, id: &str, update: JobUpdate) -> Result<Job, RepositoryError> {
        self.mutate(|jobs| {
            let job = jobs.get_mut(id).ok_or_else(|| RepositoryError::NotFound(id.into()))?;
            self.apply(job, update)?;
            Ok(job.clone())
        })
    }

    /// Record a failed attempt and settle the job in the same write.
    ///
    /// `processing -> failed -> pending | dead` is applied in memory and saved
    /// once, so the job is never persisted in `failed`.
    pub fn record_failure(
        &self,
        id: &str,
        error: impl Into<String>,
        retry: &RetryPolicy,
    ) -> Result<Job, RepositoryError> {
        self.mutate(|jobs| {
            let job = jobs.get_mut(id).ok_or_else(|| RepositoryError::NotFound(id.into()))?;
            self.apply(job, JobUpdate::failed(error))?;
            let next = retry.after_failure(job.attempts);
            self.apply(job, JobUpdate::to(next))?;
            Ok(job.clone())
        })
    }

    /// Count of jobs per state, zero entries included.
    pub fn summarize(&self) -> Result<JobSummary, RepositoryError> {
        let jobs = self.store.load()?;
        Ok(JobSummary::from_jobs(jobs.iter()))
    }

    fn apply(&self, job: &mut Job, update: JobUpdate) -> Result<(), RepositoryError> {
        let from = job.state;
        job.transition(update.state, update.attempts_delta, self.clock.utc_now())?;
        if update.error.is_some() {
            job.last_error = update.error;
        }
        tracing::debug!(
            job_id = %job.id,
            %from,
            to = %job.state,
            attempts = job.attempts,
            "job state updated"
        );
        Ok(())
    }

    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut JobSet) -> Result<R, RepositoryError>,
    ) -> Result<R, RepositoryError> {
        let _lock = self.store.lock()?;
        let mut jobs = self.store.load()?;
        let result = f(&mut jobs)?;
        self.store.save(&jobs)?;
        Ok(result)
    }
}

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
