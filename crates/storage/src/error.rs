// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use qc_core::{JobError, JobId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing the persisted job set
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("job store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode job store: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to lock job store {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("job '{0}' already exists")]
    DuplicateJob(JobId),

    #[error("job '{0}' not found")]
    NotFound(JobId),

    #[error(transparent)]
    Job(#[from] JobError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    /// True when the persisted data could not be parsed.
    pub fn is_corruption(&self) -> bool {
        matches!(self, RepositoryError::Store(StoreError::Corrupt { .. }))
    }
}
