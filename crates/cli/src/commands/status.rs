// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status command handler

use anyhow::Result;
use clap::Args;
use qc_core::{JobState, JobSummary};

use crate::config::Config;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show jobs in this state
    #[arg(long)]
    pub state: Option<JobState>,
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: StatusArgs, config: &Config) -> Result<()> {
    let jobs = super::open_repository(config).list_all().map_err(ExitError::from)?;
    let jobs = output::filter_state(jobs, args.state);
    let summary = JobSummary::from_jobs(&jobs);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output::status_json(&jobs, &summary))?);
        }
        OutputFormat::Text => print!("{}", output::format_status(&jobs, &summary)),
    }
    Ok(())
}
