// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide default scheduler
//!
//! Thin wrappers for callers that do not need their own instance. The
//! underlying scheduler is created on first use and lives for the rest
//! of the process.

use crate::error::SchedulerError;
use crate::scheduler::Scheduler;
use chime_core::{Job, JobConfig, Schedule};
use std::sync::{Arc, OnceLock};

/// The shared instance behind the module-level functions
pub fn default_scheduler() -> &'static Scheduler {
    static DEFAULT: OnceLock<Scheduler> = OnceLock::new();
    DEFAULT.get_or_init(Scheduler::new)
}

/// Register a job on the default scheduler
pub fn add(
    name: impl Into<String>,
    job: Arc<dyn Job>,
    schedule: Schedule,
) -> Result<(), SchedulerError> {
    default_scheduler().add(name, job, schedule)
}

/// Register a job with full options on the default scheduler
pub fn add_with(
    name: impl Into<String>,
    job: Arc<dyn Job>,
    config: JobConfig,
) -> Result<(), SchedulerError> {
    default_scheduler().add_with(name, job, config)
}

/// Cancel a job on the default scheduler; unknown names are a no-op
pub fn cancel(name: &str) {
    default_scheduler().cancel(name);
}

/// Start the default scheduler and block until its work drains
pub async fn start() {
    default_scheduler().start().await;
}

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;
