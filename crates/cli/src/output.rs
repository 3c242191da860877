// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use qc_core::{format_timestamp, Job, JobState, JobSummary};

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const HEADERS: [&str; 5] = ["ID", "STATE", "ATTEMPTS", "UPDATED_AT", "COMMAND"];
const GAP: &str = "  ";

/// Render jobs as an aligned table, one row per job.
///
/// Cells are padded before coloring so escape codes never skew alignment.
pub fn format_job_table(jobs: &[Job]) -> String {
    let rows: Vec<[String; 5]> = jobs
        .iter()
        .map(|job| {
            [
                job.id.to_string(),
                job.state.to_string(),
                job.attempts.to_string(),
                format_timestamp(&job.updated_at),
                job.command.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (h, w))| color::header(&pad(h, w, i == HEADERS.len() - 1)))
        .collect();
    out.push_str(&header.join(GAP));
    out.push('\n');

    for (job, row) in jobs.iter().zip(&rows) {
        let [id, state, attempts, updated, command] = row;
        let cells = [
            pad(id, widths[0], false),
            color::state(job.state, &pad(state, widths[1], false)),
            pad(attempts, widths[2], false),
            color::context(&pad(updated, widths[3], false)),
            color::literal(command),
        ];
        out.push_str(&cells.join(GAP));
        out.push('\n');
    }
    out
}

/// Per-state counts, every state listed.
pub fn format_summary(summary: &JobSummary) -> String {
    let mut out = format!("{}\n", color::header("Summary:"));
    for (state, count) in summary.iter() {
        let line = format!("  {state}: {count}");
        if count == 0 {
            out.push_str(&color::muted(&line));
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }
    out
}

/// Full `status` text: total, table (when non-empty), then the summary.
pub fn format_status(jobs: &[Job], summary: &JobSummary) -> String {
    let mut out = format!("Total jobs: {}\n", jobs.len());
    if !jobs.is_empty() {
        out.push_str(&format_job_table(jobs));
    }
    out.push('\n');
    out.push_str(&format_summary(summary));
    out
}

pub fn status_json(jobs: &[Job], summary: &JobSummary) -> serde_json::Value {
    serde_json::json!({
        "total": jobs.len(),
        "jobs": jobs,
        "summary": summary,
    })
}

/// Jobs in `state`, or all of them.
pub fn filter_state(jobs: Vec<Job>, state: Option<JobState>) -> Vec<Job> {
    match state {
        Some(state) => jobs.into_iter().filter(|j| j.state == state).collect(),
        None => jobs,
    }
}

fn pad(text: &str, width: usize, last: bool) -> String {
    if last {
        text.to_string()
    } else {
        format!("{text:<width$}")
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
