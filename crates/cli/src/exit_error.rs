// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use qc_engine::SchedulerError;
use qc_storage::RepositoryError;
use std::fmt;

/// Duplicate id, invalid input, or a job that could not be processed
pub const FAILURE: i32 = 1;
/// The job store exists but cannot be parsed
pub const CORRUPT_STORE: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<RepositoryError> for ExitError {
    fn from(err: RepositoryError) -> Self {
        let code = if err.is_corruption() { CORRUPT_STORE } else { FAILURE };
        Self::new(code, err.to_string())
    }
}

impl From<SchedulerError> for ExitError {
    fn from(err: SchedulerError) -> Self {
        match err {
            SchedulerError::Repository(e) => e.into(),
        }
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
