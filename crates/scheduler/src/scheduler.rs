// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registry and lifecycle
//!
//! The scheduler owns the name-to-entry map. Registration and
//! cancellation serialize against `start` on a single mutex; the mutex
//! is never held across an await. Outstanding work is tracked with a
//! `TaskTracker` so `start` can block until the last one-shot job has
//! run and the last repeating job has been cancelled.

use crate::entry::JobEntry;
use crate::error::SchedulerError;
use chime_core::{Clock, Job, JobConfig, Schedule, SystemClock};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

struct Registry {
    jobs: HashMap<String, JobEntry>,
    started: bool,
}

/// A timer-driven job scheduler with bounded retry on failures
///
/// Each active job runs on its own timer task; jobs fire independently
/// of each other. The clock is injectable for tests and defaults to the
/// system wall clock.
pub struct Scheduler<C: Clock = SystemClock> {
    registry: Mutex<Registry>,
    tracker: TaskTracker,
    clock: C,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock + 'static> Scheduler<C> {
    /// Build a scheduler on an injected clock
    pub fn with_clock(clock: C) -> Self {
        Self {
            registry: Mutex::new(Registry {
                jobs: HashMap::new(),
                started: false,
            }),
            tracker: TaskTracker::new(),
            clock,
        }
    }

    /// Register `job` under `name` with a plain schedule
    pub fn add(
        &self,
        name: impl Into<String>,
        job: Arc<dyn Job>,
        schedule: Schedule,
    ) -> Result<(), SchedulerError> {
        self.add_with(name, job, JobConfig::new(schedule))
    }

    /// Register `job` under `name` with full per-job options
    ///
    /// Fails when the name is taken or the schedule cannot fire against
    /// the current clock; on either error nothing is registered. When
    /// the scheduler is already started the job is armed before this
    /// returns.
    pub fn add_with(
        &self,
        name: impl Into<String>,
        job: Arc<dyn Job>,
        config: JobConfig,
    ) -> Result<(), SchedulerError> {
        let name = name.into();
        let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        if registry.jobs.contains_key(&name) {
            return Err(SchedulerError::DuplicateName(name));
        }
        config.schedule.validate(self.clock.now())?;

        let mut entry = JobEntry::new(job, config);
        if registry.started {
            entry.arm(&name, &self.clock, &self.tracker);
        }
        debug!(job = %name, armed = entry.is_armed(), "job registered");
        registry.jobs.insert(name, entry);
        Ok(())
    }

    /// Cancel the job registered under `name`; unknown names are a no-op
    ///
    /// Once this returns no new run of the job will be armed. A run that
    /// is already executing finishes naturally and is not re-armed.
    pub fn cancel(&self, name: &str) {
        let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = registry.jobs.remove(name) {
            entry.cancel();
            debug!(job = %name, "job cancelled");
        }
    }

    /// Arm every registered job and block until no scheduled work
    /// remains: every one-shot job has run (or been cancelled) and every
    /// repeating job has been cancelled. For a scheduler with repeating
    /// jobs this means blocking for the life of the process unless they
    /// are all cancelled externally.
    pub async fn start(&self) {
        let armed = {
            let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
            registry.started = true;
            let mut armed = 0;
            for (name, entry) in registry.jobs.iter_mut() {
                if !entry.is_armed() {
                    entry.arm(name, &self.clock, &self.tracker);
                    armed += 1;
                }
            }
            armed
        };
        info!(jobs = armed, "scheduler started");
        self.tracker.close();
        self.tracker.wait().await;
        info!("scheduler drained");
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
