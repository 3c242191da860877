// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker command handler: poll until interrupted

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use qc_engine::WorkerConfig;

use crate::config::Config;
use crate::exit_error::ExitError;
use crate::shutdown;

#[derive(Args, Debug)]
pub struct WorkerArgs {
    /// Seconds between polls (default from config, 5)
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

pub async fn handle(args: WorkerArgs, config: &Config) -> Result<()> {
    let poll_interval = match args.interval {
        Some(0) => bail!("--interval must be at least 1 second"),
        Some(secs) => Duration::from_secs(secs),
        None => config.poll_interval,
    };

    let cancel = shutdown::install_handler();
    let (scheduler, printer) = super::scheduler_with_printer(config);
    let scheduler =
        scheduler.with_config(WorkerConfig::default().poll_interval(poll_interval));

    let result = scheduler.worker(cancel).await;
    drop(scheduler);
    let _ = printer.await;

    let summary = result.map_err(ExitError::from)?;
    tracing::info!(
        cycles = summary.cycles,
        completed = summary.completed,
        retried = summary.retried,
        dead = summary.dead,
        errored = summary.errored,
        "worker exited"
    );
    Ok(())
}
