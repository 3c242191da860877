// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Enqueue command handler

use anyhow::{bail, Result};
use clap::Args;
use qc_core::JobId;
use serde::Deserialize;

use crate::config::Config;
use crate::exit_error::ExitError;

#[derive(Args, Debug)]
pub struct EnqueueArgs {
    /// Job as a JSON object, e.g. '{"id":"job1","command":"echo Hello"}'
    pub job: Option<String>,
    /// Job id (overrides the JSON; generated when absent)
    #[arg(long)]
    pub id: Option<String>,
    /// Shell command to run (overrides the JSON)
    #[arg(long)]
    pub command: Option<String>,
}

/// Accepted JSON payload.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobRequest {
    id: Option<String>,
    command: Option<String>,
}

/// Merge the JSON payload and flags into an id and command.
pub(crate) fn parse_request(
    json: Option<&str>,
    id: Option<String>,
    command: Option<String>,
) -> Result<(JobId, String)> {
    let request = match json {
        Some(text) => {
            let value: serde_json::Value = serde_json::from_str(text)
                .map_err(|e| anyhow::anyhow!("invalid job JSON: {e}"))?;
            if !value.is_object() {
                bail!("job JSON must be an object");
            }
            serde_json::from_value::<JobRequest>(value)
                .map_err(|e| anyhow::anyhow!("invalid job: {e}"))?
        }
        None => JobRequest::default(),
    };

    let Some(command) = command.or(request.command) else {
        bail!("job needs a 'command' (in the JSON or via --command)");
    };
    let id = match id.or(request.id) {
        Some(id) => JobId::new(id),
        None => JobId::generate(),
    };
    Ok((id, command))
}

pub fn handle(args: EnqueueArgs, config: &Config) -> Result<()> {
    let (id, command) = parse_request(args.job.as_deref(), args.id, args.command)?;

    let job = super::open_repository(config).add(id, &command).map_err(ExitError::from)?;

    println!("Job enqueued: id={}, command={}", job.id, job.command);
    Ok(())
}

#[cfg(test)]
#[path = "enqueue_tests.rs"]
mod tests;
