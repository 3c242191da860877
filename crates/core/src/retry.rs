// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry policy for failed attempts.

use crate::job::JobState;
use serde::{Deserialize, Serialize};

/// Failed attempts allowed before a job is marked dead.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Policy allowing `max_retries` failed attempts (at least one).
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries: max_retries.max(1) }
    }

    /// State a failed job moves to once its attempt count is `attempts`.
    pub fn after_failure(&self, attempts: u32) -> JobState {
        if attempts < self.max_retries {
            JobState::Pending
        } else {
            JobState::Dead
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
