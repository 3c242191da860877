// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations and timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format elapsed seconds as a compact unit string ("5s", "2m", "1h", "3d").
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86_399 => format!("{}h", secs / 3600),
        _ => format!("{}d", secs / 86_400),
    }
}

/// Format a millisecond duration, keeping sub-second precision for short runs.
pub fn format_elapsed_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format_elapsed(ms / 1000)
    }
}

/// ISO-8601 timestamp with second precision, e.g. `2026-01-01T00:00:00Z`.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
