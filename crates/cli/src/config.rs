// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration: defaults, `config.toml`, then environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use qc_core::{RetryPolicy, DEFAULT_MAX_RETRIES};
use qc_engine::DEFAULT_POLL_INTERVAL;
use serde::Deserialize;
use thiserror::Error;

use crate::env;

pub const CONFIG_FILE: &str = "config.toml";
pub const STORE_FILE: &str = "jobs.json";
pub const LOG_FILE: &str = "queuectl.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory (set QUEUECTL_STATE_DIR)")]
    NoStateDir,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("max_retries must be at least 1")]
    ZeroRetries,

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

/// Contents of `config.toml`; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    poll_interval_secs: Option<u64>,
    max_retries: Option<u32>,
    command_timeout_secs: Option<u64>,
    store_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub state_dir: PathBuf,
    pub store_path: PathBuf,
    pub log_path: PathBuf,
    pub poll_interval: Duration,
    pub max_retries: u32,
    pub command_timeout: Option<Duration>,
}

impl Config {
    /// Resolve the state directory and load configuration from it.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_in(env::state_dir()?)
    }

    /// Load configuration rooted at `state_dir`.
    pub fn load_in(state_dir: PathBuf) -> Result<Self, ConfigError> {
        let file = read_file_config(&state_dir.join(CONFIG_FILE))?;
        let mut config = Self::defaults(state_dir);
        config.apply_file(file);
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults(state_dir: PathBuf) -> Self {
        Self {
            store_path: state_dir.join(STORE_FILE),
            log_path: state_dir.join(LOG_FILE),
            state_dir,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_retries: DEFAULT_MAX_RETRIES,
            command_timeout: None,
        }
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(secs) = file.poll_interval_secs {
            self.poll_interval = Duration::from_secs(secs);
        }
        if let Some(n) = file.max_retries {
            self.max_retries = n;
        }
        if let Some(secs) = file.command_timeout_secs {
            self.command_timeout = timeout(Duration::from_secs(secs));
        }
        if let Some(path) = file.store_path {
            // Relative paths are relative to the state directory
            self.store_path = self.state_dir.join(path);
        }
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(path) = env::store_path() {
            self.store_path = path;
        }
        if let Some(interval) = env::poll_interval()? {
            self.poll_interval = interval;
        }
        if let Some(n) = env::max_retries()? {
            self.max_retries = n;
        }
        if let Some(limit) = env::command_timeout()? {
            self.command_timeout = timeout(limit);
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_retries == 0 {
            return Err(ConfigError::ZeroRetries);
        }
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }
}

/// Zero means no timeout
fn timeout(limit: Duration) -> Option<Duration> {
    (!limit.is_zero()).then_some(limit)
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(source) => Err(ConfigError::Io { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
