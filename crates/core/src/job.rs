// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job identifier and state machine.

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

crate::define_id! {
    /// Unique identifier for a job.
    ///
    /// Either supplied by the caller at enqueue time or generated.
    pub struct JobId("job-");
}

/// Lifecycle state of a job.
///
/// ```text
/// pending ──▶ processing ──▶ completed
///    ▲             │
///    │             ▼
///    └───────── failed ──▶ dead
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Waiting to be picked up
    Pending,
    /// Command is running
    Processing,
    /// Command exited 0
    Completed,
    /// Last attempt failed; resolved to pending or dead in the same step
    Failed,
    /// Retries exhausted
    Dead,
}

crate::string_enum! {
    JobState("job state") {
        Pending => "pending",
        Processing => "processing",
        Completed => "completed",
        Failed => "failed",
        Dead => "dead",
    }
}

impl JobState {
    /// Completed and dead jobs never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Dead)
    }

    /// Whether the state machine allows `self -> to`.
    pub fn can_transition_to(&self, to: JobState) -> bool {
        use JobState::*;
        matches!(
            (self, to),
            (Pending, Processing)
                | (Processing, Completed)
                | (Processing, Failed)
                | (Failed, Pending)
                | (Failed, Dead)
        )
    }
}

/// Rejected job mutation or construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("job id must not be empty")]
    EmptyId,

    #[error("job id '{0}' must not contain whitespace or control characters")]
    InvalidId(String),

    #[error("job command must not be empty")]
    EmptyCommand,

    #[error("job {id}: illegal transition {from} -> {to}")]
    InvalidTransition { id: JobId, from: JobState, to: JobState },

    #[error("job {id}: only a failed attempt may increment attempts")]
    UnexpectedAttempt { id: JobId },
}

/// Check a caller-supplied job id.
pub fn validate_id(id: &str) -> Result<(), JobError> {
    if id.is_empty() {
        return Err(JobError::EmptyId);
    }
    if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(JobError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// A queued shell command and its lifecycle bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub command: String,
    pub state: JobState,
    /// Number of failed attempts so far
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Diagnostic from the most recent failed attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Job {
    /// Create a pending job after validating its id and command.
    pub fn new(
        id: JobId,
        command: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, JobError> {
        validate_id(&id)?;
        let command = command.into();
        if command.trim().is_empty() {
            return Err(JobError::EmptyCommand);
        }
        let now = clock.utc_now();
        Ok(Self {
            id,
            command,
            state: JobState::Pending,
            attempts: 0,
            created_at: now,
            updated_at: now,
            last_error: None,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Move to `to`, adding `attempts_delta` failed attempts.
    ///
    /// Attempts may only grow on `processing -> failed`; `last_error` is
    /// cleared when the job completes.
    pub fn transition(
        &mut self,
        to: JobState,
        attempts_delta: u32,
        at: DateTime<Utc>,
    ) -> Result<(), JobError> {
        if !self.state.can_transition_to(to) {
            return Err(JobError::InvalidTransition { id: self.id.clone(), from: self.state, to });
        }
        if attempts_delta > 0 && to != JobState::Failed {
            return Err(JobError::UnexpectedAttempt { id: self.id.clone() });
        }
        self.state = to;
        self.attempts = self.attempts.saturating_add(attempts_delta);
        self.updated_at = at;
        if to == JobState::Completed {
            self.last_error = None;
        }
        Ok(())
    }
}

crate::builder! {
    pub struct JobBuilder => Job {
        into {
            id: JobId = "job-1",
            command: String = "true",
        }
        set {
            state: JobState = JobState::Pending,
            attempts: u32 = 0,
            created_at: DateTime<Utc> = DateTime::<Utc>::default(),
            updated_at: DateTime<Utc> = DateTime::<Utc>::default(),
        }
        option {
            last_error: String = None,
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
