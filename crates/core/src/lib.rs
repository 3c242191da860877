// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! qc-core: job model and lifecycle state machine for the queuectl job queue

pub mod macros;

pub mod clock;
pub mod id;
pub mod job;
pub mod retry;
pub mod summary;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
#[cfg(any(test, feature = "test-support"))]
pub use job::JobBuilder;
pub use job::{validate_id, Job, JobError, JobId, JobState};
pub use macros::ParseEnumError;
pub use retry::{RetryPolicy, DEFAULT_MAX_RETRIES};
pub use summary::JobSummary;
pub use time_fmt::{format_elapsed, format_elapsed_ms, format_timestamp};
