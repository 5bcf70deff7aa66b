// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime-core: data model and timing resolver for the chime scheduler
//!
//! This crate provides:
//! - A wall-clock abstraction for testable time handling
//! - The schedule description (`Schedule`, `Repeat`, `ClockPattern`)
//! - The pure resolver that turns a schedule plus an anchor instant into
//!   the concrete duration until the next occurrence
//! - The `Job` contract consumed by the scheduler crate

pub mod clock;
pub mod job;
pub mod pattern;
pub mod schedule;

pub use clock::{Clock, FakeClock, SystemClock};
pub use job::{BoxError, Job, JobConfig};
pub use pattern::{ClockPattern, PatternError};
pub use schedule::{every, Repeat, Schedule, ScheduleError, Unit};
