// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! qc-engine: executes queued jobs and drives them through their lifecycle

mod error;
pub mod executor;
mod progress;
mod scheduler;

pub use error::SchedulerError;
pub use executor::{Executor, FailureReason, Outcome, ShellExecutor};
#[cfg(any(test, feature = "test-support"))]
pub use executor::{ExecuteCall, FakeExecutor};
pub use progress::Progress;
pub use scheduler::{
    JobReport, RunReport, Scheduler, WorkerConfig, WorkerSummary, DEFAULT_POLL_INTERVAL,
};
