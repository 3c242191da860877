// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk shape of the job set.
//!
//! The file is a JSON object keyed by job id. The id lives only in the key,
//! so each record carries the remaining fields:
//!
//! ```json
//! {
//!   "job1": {
//!     "command": "echo Hello",
//!     "state": "completed",
//!     "attempts": 0,
//!     "created_at": "2026-01-01T00:00:00Z",
//!     "updated_at": "2026-01-01T00:00:01Z"
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use qc_core::{Job, JobId, JobState};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// All jobs, keyed by id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSet {
    jobs: IndexMap<JobId, Job>,
}

impl JobSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.jobs.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Job> {
        self.jobs.get_mut(id)
    }

    /// Insert a job, returning it back if the id is already taken.
    pub fn insert(&mut self, job: Job) -> Result<(), Job> {
        if self.jobs.contains_key(job.id.as_str()) {
            return Err(job);
        }
        self.jobs.insert(job.id.clone(), job);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    pub fn into_jobs(self) -> Vec<Job> {
        self.jobs.into_values().collect()
    }
}

impl FromIterator<Job> for JobSet {
    /// Later duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        let mut set = JobSet::new();
        for job in iter {
            let _ = set.insert(job);
        }
        set
    }
}

/// Borrowed record for writing.
#[derive(Serialize)]
struct RecordRef<'a> {
    command: &'a str,
    state: JobState,
    attempts: u32,
    created_at: &'a DateTime<Utc>,
    updated_at: &'a DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_error: Option<&'a str>,
}

/// Owned record for reading. `created_at` is optional so hand-written
/// stores with only the core fields still load.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Record {
    command: String,
    state: JobState,
    attempts: u32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    last_error: Option<String>,
}

impl Record {
    fn into_job(self, id: JobId) -> Job {
        Job {
            id,
            command: self.command,
            state: self.state,
            attempts: self.attempts,
            created_at: self.created_at.unwrap_or(self.updated_at),
            updated_at: self.updated_at,
            last_error: self.last_error,
        }
    }
}

impl Serialize for JobSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.jobs.len()))?;
        for (id, job) in &self.jobs {
            map.serialize_entry(
                id,
                &RecordRef {
                    command: &job.command,
                    state: job.state,
                    attempts: job.attempts,
                    created_at: &job.created_at,
                    updated_at: &job.updated_at,
                    last_error: job.last_error.as_deref(),
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for JobSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct JobSetVisitor;

        impl<'de> Visitor<'de> for JobSetVisitor {
            type Value = JobSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping job id to job record")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<JobSet, M::Error> {
                let mut jobs = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, record)) = access.next_entry::<JobId, Record>()? {
                    qc_core::validate_id(&id).map_err(de::Error::custom)?;
                    if jobs.contains_key(&id) {
                        return Err(de::Error::custom(format!("duplicate job id '{}'", id)));
                    }
                    let job = record.into_job(id.clone());
                    jobs.insert(id, job);
                }
                Ok(JobSet { jobs })
            }
        }

        deserializer.deserialize_map(JobSetVisitor)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
