// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run command handler: one pass over the pending jobs

use anyhow::Result;

use crate::config::Config;
use crate::exit_error::{ExitError, FAILURE};

pub async fn handle(config: &Config) -> Result<()> {
    let (scheduler, printer) = super::scheduler_with_printer(config);
    let result = scheduler.run_once().await;
    drop(scheduler);
    // Flush remaining progress lines before reporting
    let _ = printer.await;

    let report = result.map_err(ExitError::from)?;
    if report.is_empty() {
        println!("No pending jobs to run.");
        return Ok(());
    }

    tracing::info!(
        completed = report.completed(),
        retrying = report.retrying(),
        dead = report.dead(),
        errored = report.errored(),
        "run finished"
    );
    if report.errored() > 0 {
        return Err(ExitError::new(
            FAILURE,
            format!("{} job(s) could not be processed", report.errored()),
        )
        .into());
    }
    Ok(())
}
