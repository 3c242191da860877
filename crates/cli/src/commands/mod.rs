// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod enqueue;
pub mod list;
pub mod run;
pub mod status;
pub mod worker;

use qc_core::SystemClock;
use qc_engine::{Progress, Scheduler, ShellExecutor};
use qc_storage::{FileStore, JobRepository};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::Config;

type FileScheduler = Scheduler<FileStore, SystemClock, ShellExecutor>;

fn open_repository(config: &Config) -> JobRepository<FileStore> {
    JobRepository::open(FileStore::new(&config.store_path))
}

/// Scheduler over the configured store, plus a task echoing its progress to
/// stdout. The printer finishes once the scheduler is dropped.
fn scheduler_with_printer(config: &Config) -> (FileScheduler, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Progress>();
    let printer = tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            println!("{progress}");
        }
    });

    let executor = ShellExecutor::new().with_timeout(config.command_timeout);
    let scheduler = Scheduler::new(open_repository(config), executor)
        .with_retry_policy(config.retry_policy())
        .with_progress(tx);
    (scheduler, printer)
}
