// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job entries and the arm/run/re-arm cycle
//!
//! Each armed entry owns one task: wait out the resolved duration, run
//! the job with retry, then either re-arm (repeating schedules) or
//! finish. The cancellation signal is consulted when the entry arms and
//! while its timer is pending, never mid-run, so an in-flight run always
//! completes before cancellation takes effect.

use chime_core::{Clock, Job, JobConfig};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

pub(crate) struct JobEntry {
    job: Arc<dyn Job>,
    config: JobConfig,
    recurring: bool,
    cancel: watch::Sender<bool>,
    armed: bool,
}

impl JobEntry {
    pub(crate) fn new(job: Arc<dyn Job>, config: JobConfig) -> Self {
        let (cancel, _) = watch::channel(false);
        let recurring = config.schedule.is_recurring();
        Self {
            job,
            config,
            recurring,
            cancel,
            armed: false,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed
    }

    /// Signal the entry to stop. A pending timer is abandoned; a run
    /// already executing finishes and is not re-armed.
    pub(crate) fn cancel(&self) {
        // send_replace stores the signal even while no task is subscribed
        self.cancel.send_replace(true);
    }

    /// Spawn the entry's timer task on `tracker`. The task owns the
    /// anchor: `last_run` when supplied, otherwise now, updated after
    /// every run.
    pub(crate) fn arm<C>(&mut self, name: &str, clock: &C, tracker: &TaskTracker)
    where
        C: Clock + 'static,
    {
        self.armed = true;
        let name = name.to_string();
        let job = Arc::clone(&self.job);
        let schedule = self.config.schedule.clone();
        let retry_count = self.config.retry_count;
        let recurring = self.recurring;
        let mut cancel = self.cancel.subscribe();
        let clock = clock.clone();

        tracker.spawn(async move {
            let mut anchor = schedule.last_run.unwrap_or_else(|| clock.now());
            loop {
                if *cancel.borrow() {
                    debug!(job = %name, "job cancelled");
                    return;
                }
                let wait = schedule.next(anchor, clock.now());
                if wait.is_zero() {
                    warn!(job = %name, "schedule stopped resolving; job retired");
                    return;
                }
                debug!(job = %name, wait_ms = wait.as_millis() as u64, "armed");
                tokio::select! {
                    biased;
                    _ = cancel.changed() => {
                        debug!(job = %name, "job cancelled");
                        return;
                    }
                    () = tokio::time::sleep(wait) => {
                        run_with_retry(&name, job.as_ref(), retry_count).await;
                        anchor = clock.now();
                        if !recurring {
                            return;
                        }
                    }
                }
            }
        });
    }
}

/// Run the job, retrying failures back to back up to `retry_count`
/// additional attempts and stopping at the first success. Exhausted
/// failures are swallowed; the job still counts as run for scheduling.
pub(crate) async fn run_with_retry(name: &str, job: &dyn Job, retry_count: u32) {
    for attempt in 0..=retry_count {
        match job.run().await {
            Ok(()) => return,
            Err(error) => {
                warn!(job = %name, attempt, error = %error, "job run failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
