// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime-scheduler: timer-driven job execution with bounded retry
//!
//! Jobs are registered under a unique name together with a
//! [`Schedule`](chime_core::Schedule). Once the scheduler is started,
//! each job gets its own timer task that waits out the resolved duration,
//! runs the job (retrying failures back to back), and re-arms itself for
//! as long as the schedule repeats. [`Scheduler::start`] blocks until
//! every one-shot job has run and every repeating job has been cancelled.
//!
//! Cancellation never interrupts a run that is already executing; the run
//! finishes naturally and the job is simply not re-armed.

mod entry;
mod error;
mod facade;
mod scheduler;

pub use error::SchedulerError;
pub use facade::{add, add_with, cancel, default_scheduler, start};
pub use scheduler::Scheduler;
