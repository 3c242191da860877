// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::config::ConfigError;

/// Resolve state directory: QUEUECTL_STATE_DIR > XDG_STATE_HOME/queuectl > ~/.local/state/queuectl
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = non_empty("QUEUECTL_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("queuectl"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/queuectl"))
}

/// Job store path override
pub fn store_path() -> Option<PathBuf> {
    non_empty("QUEUECTL_STORE").map(PathBuf::from)
}

/// Poll interval override
pub fn poll_interval() -> Result<Option<Duration>, ConfigError> {
    Ok(parsed::<u64>("QUEUECTL_POLL_INTERVAL_MS")?.map(Duration::from_millis))
}

pub fn max_retries() -> Result<Option<u32>, ConfigError> {
    parsed("QUEUECTL_MAX_RETRIES")
}

/// Per-command timeout override; `0` disables the timeout
pub fn command_timeout() -> Result<Option<Duration>, ConfigError> {
    Ok(parsed::<u64>("QUEUECTL_COMMAND_TIMEOUT_MS")?.map(Duration::from_millis))
}

/// Log filter directives: QUEUECTL_LOG > RUST_LOG
pub fn log_filter() -> Option<String> {
    non_empty("QUEUECTL_LOG").or_else(|| non_empty("RUST_LOG"))
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.trim().is_empty())
}

fn parsed<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
