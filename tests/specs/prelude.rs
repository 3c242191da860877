// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.
//!
//! Every [`Project`] gets its own state directory, so specs never touch the
//! user's queue and can run in parallel.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::Once;
use std::time::{Duration, Instant};

pub use serde_json::Value;

/// Environment that would leak the caller's setup into a test
const SCRUBBED_ENV: &[&str] = &[
    "QUEUECTL_STATE_DIR",
    "QUEUECTL_STORE",
    "QUEUECTL_POLL_INTERVAL_MS",
    "QUEUECTL_MAX_RETRIES",
    "QUEUECTL_COMMAND_TIMEOUT_MS",
    "QUEUECTL_LOG",
    "RUST_LOG",
    "COLOR",
];

static BUILD: Once = Once::new();

/// Path to the `queuectl` binary, building it when the test run did not.
pub fn binary() -> PathBuf {
    #[allow(deprecated)]
    let path = assert_cmd::cargo::cargo_bin("queuectl");
    BUILD.call_once(|| {
        if !path.exists() {
            let status = std::process::Command::new(env!("CARGO"))
                .args(["build", "--quiet", "-p", "queuectl"])
                .status()
                .expect("failed to invoke cargo");
            assert!(status.success(), "failed to build queuectl");
        }
    });
    path
}

/// `queuectl` with no state directory, for help and version output.
pub fn cli() -> Cli {
    Cli::new(None)
}

/// Isolated state directory for one test.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().expect("failed to create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.path().join("jobs.json")
    }

    /// Write a file relative to the state directory.
    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(path, contents).expect("failed to write file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).expect("failed to read file")
    }

    /// `queuectl` rooted at this project's state directory.
    pub fn qc(&self) -> Cli {
        Cli::new(Some(self.path()))
    }

    /// Shorthand for `queuectl enqueue --id <id> --command <command>`.
    pub fn enqueue(&self, id: &str, command: &str) {
        self.qc().args(&["enqueue", "--id", id, "--command", command]).passes();
    }

    /// The persisted job store, parsed.
    pub fn jobs(&self) -> Value {
        serde_json::from_str(&self.read("jobs.json")).expect("job store is not valid JSON")
    }

    /// Poll `condition` against the job store until it holds or `timeout` passes.
    pub fn wait_for_jobs(&self, timeout: Duration, condition: impl Fn(&Value) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            let ready = std::fs::read_to_string(self.store_path())
                .ok()
                .and_then(|text| serde_json::from_str::<Value>(&text).ok())
                .is_some_and(|jobs| condition(&jobs));
            if ready {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }
}

/// Builder for one `queuectl` invocation.
pub struct Cli {
    cmd: std::process::Command,
}

impl Cli {
    fn new(state_dir: Option<&Path>) -> Self {
        let mut cmd = std::process::Command::new(binary());
        for var in SCRUBBED_ENV {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        if let Some(dir) = state_dir {
            cmd.env("QUEUECTL_STATE_DIR", dir);
        }
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Put the process in a new process group, as a shell job would be, so
    /// the whole group can be signalled like a terminal Ctrl+C.
    #[cfg(unix)]
    pub fn own_process_group(mut self) -> Self {
        use std::os::unix::process::CommandExt;
        self.cmd.process_group(0);
        self
    }

    /// Spawn without waiting, for long-running commands.
    pub fn spawn(mut self) -> std::process::Child {
        self.cmd
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .expect("failed to spawn queuectl")
    }

    fn output(mut self) -> RunResult {
        let output = self.cmd.output().expect("failed to run queuectl");
        RunResult::from(output)
    }

    /// Run and assert exit code 0.
    pub fn passes(self) -> RunResult {
        let result = self.output();
        assert_eq!(result.code, Some(0), "expected success\n{result}");
        result
    }

    /// Run and assert a non-zero exit.
    pub fn fails(self) -> RunResult {
        let result = self.output();
        assert_ne!(result.code, Some(0), "expected failure\n{result}");
        result
    }

    /// Run and assert a specific exit code.
    pub fn fails_with(self, code: i32) -> RunResult {
        let result = self.output();
        assert_eq!(result.code, Some(code), "unexpected exit code\n{result}");
        result
    }
}

/// Captured output of a finished invocation.
pub struct RunResult {
    pub code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl std::fmt::Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "exit: {:?}\n--- stdout ---\n{}--- stderr ---\n{}",
            self.code, self.stdout, self.stderr
        )
    }
}

impl RunResult {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}\n{self}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout unexpectedly has {needle:?}\n{self}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}\n{self}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    /// Each stdout line parsed as JSON.
    pub fn json_lines(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
            .collect()
    }
}
