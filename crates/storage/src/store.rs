// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-collection persistence for the job set.

use crate::error::StoreError;
use crate::record::JobSet;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Durable read and write of the complete job set.
///
/// `save` replaces prior contents atomically. `lock` serializes writers
/// across processes for the duration of one load-modify-save cycle;
/// plain readers never take it.
pub trait Store: Send + Sync {
    fn load(&self) -> Result<JobSet, StoreError>;
    fn save(&self, jobs: &JobSet) -> Result<(), StoreError>;
    fn lock(&self) -> Result<StoreLock, StoreError>;
}

/// Exclusive writer lock; released on drop.
#[derive(Debug)]
pub struct StoreLock {
    // NOTE(lifetime): Held to maintain the advisory lock; released when closed
    _file: Option<File>,
}

impl StoreLock {
    /// A lock with nothing behind it, for single-process stores.
    pub fn unlocked() -> Self {
        Self { _file: None }
    }
}

/// JSON file store.
///
/// Writes go to `<file>.tmp` beside the target and are renamed over it, so a
/// concurrent reader sees either the old or the new file, never a torn one.
/// The advisory lock lives in a separate `<file>.lock` so the rename does not
/// swap the locked inode out from under a waiting writer.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    tmp_path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self { lock_path: with_suffix(&path, ".lock"), tmp_path: with_suffix(&path, ".tmp"), path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
        let path = path.to_path_buf();
        move |source| StoreError::Io { path, source }
    }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(self.io_err(parent))
            }
            _ => Ok(()),
        }
    }

    fn write_tmp(&self, jobs: &JobSet) -> Result<(), StoreError> {
        let file = File::create(&self.tmp_path).map_err(self.io_err(&self.tmp_path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, jobs).map_err(StoreError::Encode)?;
        writer.write_all(b"\n").map_err(self.io_err(&self.tmp_path))?;
        let file = writer.into_inner().map_err(|e| StoreError::Io {
            path: self.tmp_path.clone(),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(self.io_err(&self.tmp_path))
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<JobSet, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "job store absent, starting empty");
                return Ok(JobSet::new());
            }
            Err(e) => return Err(self.io_err(&self.path)(e)),
        };
        if contents.trim().is_empty() {
            return Ok(JobSet::new());
        }
        serde_json::from_str(&contents)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })
    }

    fn save(&self, jobs: &JobSet) -> Result<(), StoreError> {
        self.ensure_parent()?;
        if let Err(e) = self.write_tmp(jobs) {
            let _ = fs::remove_file(&self.tmp_path);
            return Err(e);
        }
        fs::rename(&self.tmp_path, &self.path).map_err(self.io_err(&self.path))?;
        tracing::trace!(path = %self.path.display(), jobs = jobs.len(), "saved job store");
        Ok(())
    }

    fn lock(&self) -> Result<StoreLock, StoreError> {
        self.ensure_parent()?;
        // Don't truncate: the lock file carries no data
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(self.io_err(&self.lock_path))?;
        file.lock_exclusive()
            .map_err(|source| StoreError::Lock { path: self.lock_path.clone(), source })?;
        Ok(StoreLock { _file: Some(file) })
    }
}

/// In-memory store for tests and embedding.
///
/// Keeps the serialized JSON text rather than the parsed set, so the same
/// encoding is exercised as with [`FileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Mutex<String>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw text, e.g. to simulate a corrupt store.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self { contents: Mutex::new(contents.into()), saves: Mutex::new(0) }
    }

    pub fn contents(&self) -> String {
        self.contents.lock().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<JobSet, StoreError> {
        let contents = self.contents.lock();
        if contents.trim().is_empty() {
            return Ok(JobSet::new());
        }
        serde_json::from_str(&contents)
            .map_err(|source| StoreError::Corrupt { path: PathBuf::from(":memory:"), source })
    }

    fn save(&self, jobs: &JobSet) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(jobs).map_err(StoreError::Encode)?;
        *self.contents.lock() = encoded;
        *self.saves.lock() += 1;
        Ok(())
    }

    fn lock(&self) -> Result<StoreLock, StoreError> {
        Ok(StoreLock::unlocked())
    }
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn load(&self) -> Result<JobSet, StoreError> {
        (**self).load()
    }

    fn save(&self, jobs: &JobSet) -> Result<(), StoreError> {
        (**self).save(jobs)
    }

    fn lock(&self) -> Result<StoreLock, StoreError> {
        (**self).lock()
    }
}

/// `jobs.json` + `.lock` → `jobs.json.lock`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
