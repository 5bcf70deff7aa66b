// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration errors

use chime_core::ScheduleError;
use thiserror::Error;

/// Errors reported to the caller at registration time
///
/// Failures during a job's execution are never surfaced here; the
/// scheduler retries and reschedules instead of failing the caller.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A job with the same name is already registered
    #[error("a job named {0:?} is already scheduled")]
    DuplicateName(String),

    /// The supplied schedule cannot fire
    #[error("invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}
