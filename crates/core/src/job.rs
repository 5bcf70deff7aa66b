// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job contract and per-job execution options

use crate::schedule::Schedule;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Boxed error returned from a job run
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A schedulable unit of work
///
/// The scheduler places no constraint on what `run` does; it may be a
/// pure computation, an external process invocation, or an I/O call. A
/// failed run is retried according to the job's [`JobConfig`].
#[async_trait]
pub trait Job: Send + Sync {
    async fn run(&self) -> Result<(), BoxError>;
}

/// Per-job options: the schedule plus retry and timeout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub schedule: Schedule,
    /// Additional attempts after a failed run
    #[serde(default)]
    pub retry_count: u32,
    /// Reserved; not enforced by the execution path
    #[serde(with = "humantime_serde", default)]
    pub timeout: Option<Duration>,
}

impl JobConfig {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            retry_count: 0,
            timeout: None,
        }
    }

    pub fn retries(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
