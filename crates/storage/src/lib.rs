// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! qc-storage: durable job store and the repository layered on it
//!
//! The whole job set lives in one JSON file, rewritten atomically on every
//! mutation. [`JobRepository`] owns the lock → load → mutate → save cycle so a
//! single state transition is one auditable write.

mod error;
mod record;
mod repository;
mod store;

pub use error::{RepositoryError, StoreError};
pub use record::JobSet;
pub use repository::{JobRepository, JobUpdate};
pub use store::{FileStore, MemoryStore, Store, StoreLock};
