// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-state job counts.

use crate::job::{Job, JobState};
use serde::Serialize;
use std::collections::BTreeMap;

/// Count of jobs in each state. Every state is present, including zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JobSummary {
    counts: BTreeMap<JobState, usize>,
}

impl JobSummary {
    pub fn from_jobs<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> Self {
        let mut summary = Self::default();
        for job in jobs {
            *summary.counts.entry(job.state).or_default() += 1;
        }
        summary
    }

    pub fn get(&self, state: JobState) -> usize {
        self.counts.get(&state).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(state, count)` pairs in lifecycle order.
    pub fn iter(&self) -> impl Iterator<Item = (JobState, usize)> + '_ {
        self.counts.iter().map(|(state, count)| (*state, *count))
    }
}

impl Default for JobSummary {
    fn default() -> Self {
        Self { counts: JobState::ALL.iter().map(|s| (*s, 0)).collect() }
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
