// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, JobState};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for core state machine types.
pub mod strategies {
    use crate::job::{Job, JobState};
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    pub fn arb_job_state() -> impl Strategy<Value = JobState> {
        prop_oneof![
            Just(JobState::Pending),
            Just(JobState::Processing),
            Just(JobState::Completed),
            Just(JobState::Failed),
            Just(JobState::Dead),
        ]
    }

    fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
        // Whole milliseconds between 2001 and 2033
        (1_000_000_000_000i64..2_000_000_000_000i64)
            .prop_map(|ms| DateTime::<Utc>::from_timestamp_millis(ms).unwrap_or_default())
    }

    pub fn arb_job() -> impl Strategy<Value = Job> {
        (
            "[a-z0-9_-]{1,16}",
            "[ -~]{1,40}",
            arb_job_state(),
            0u32..10,
            arb_timestamp(),
            arb_timestamp(),
            proptest::option::of("[ -~]{0,40}"),
        )
            .prop_map(|(id, command, state, attempts, created_at, updated_at, last_error)| Job {
                id: id.into(),
                command,
                state,
                attempts,
                created_at,
                updated_at,
                last_error,
            })
    }
}

// ── Job factories ───────────────────────────────────────────────────────

/// One job per state, ids named after the state.
pub fn one_job_per_state() -> Vec<Job> {
    JobState::ALL
        .iter()
        .map(|state| {
            let attempts = match state {
                JobState::Dead => 3,
                JobState::Failed => 1,
                _ => 0,
            };
            let builder =
                Job::builder().id(state.as_str()).command(format!("echo {state}")).state(*state);
            let builder = if attempts > 0 {
                builder.attempts(attempts).last_error(format!("exit status 1 ({state})"))
            } else {
                builder
            };
            builder.build()
        })
        .collect()
}

