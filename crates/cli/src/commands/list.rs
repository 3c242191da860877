// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! List command handler: one JSON object per job

use anyhow::Result;
use clap::Args;
use qc_core::JobState;

use crate::config::Config;
use crate::exit_error::ExitError;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list jobs in this state
    #[arg(long)]
    pub state: Option<JobState>,
}

pub fn handle(args: ListArgs, config: &Config) -> Result<()> {
    let repo = super::open_repository(config);
    let jobs = match args.state {
        Some(state) => repo.list_by_state(state),
        None => repo.list_all(),
    }
    .map_err(ExitError::from)?;

    if jobs.is_empty() {
        // stdout stays pure JSON lines
        eprintln!("No jobs found.");
        return Ok(());
    }
    for job in &jobs {
        println!("{}", serde_json::to_string(job)?);
    }
    Ok(())
}
