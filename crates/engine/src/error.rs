// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use qc_storage::RepositoryError;
use thiserror::Error;

/// Errors that stop a scheduling round
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SchedulerError {
    pub fn is_corruption(&self) -> bool {
        match self {
            SchedulerError::Repository(e) => e.is_corruption(),
        }
    }
}
