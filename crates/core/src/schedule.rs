// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule description and timing resolver
//!
//! A `Schedule` describes how often and at what wall-clock alignment a job
//! repeats. The resolver turns a schedule plus an anchor instant into the
//! concrete duration until the next occurrence.
//!
//! ```
//! use chime_core::pattern::ClockPattern;
//! use chime_core::schedule::{every, Schedule};
//!
//! // every two hours, aligned to the next :00 minute
//! let aligned = Schedule::every(every(2).hours()).at("**:00".parse::<ClockPattern>()?);
//! // once, after two hours and three minutes
//! let soon = Schedule::each("2h3m");
//! // once, on the next Sunday at noon
//! let sunday = Schedule::once().on(chrono::Weekday::Sun).at("12:00".parse()?);
//! # Ok::<(), chime_core::pattern::PatternError>(())
//! ```

use crate::pattern::ClockPattern;
use chrono::{DateTime, Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Why a schedule cannot be registered
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No interval source at all: a default `Schedule` never fires
    #[error("schedule has no interval source (each, every, on, or at)")]
    Empty,

    /// The `each` duration string did not parse
    #[error("unparseable each duration {expr:?}")]
    UnparseableEach {
        expr: String,
        #[source]
        source: humantime::DurationError,
    },

    /// The schedule resolves to a zero interval and would never fire
    #[error("schedule never fires (resolves to a zero interval)")]
    NeverFires,
}

/// Unit of repetition for `every`-based schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

/// A repetition count paired with its unit, built with [`every`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeat {
    count: u32,
    unit: Unit,
}

/// Start building a repetition. Counts smaller than 1 are clamped to 1;
/// the unit defaults to seconds.
pub fn every(count: u32) -> Repeat {
    Repeat {
        count: count.max(1),
        unit: Unit::Second,
    }
}

impl Repeat {
    pub fn milliseconds(mut self) -> Self {
        self.unit = Unit::Millisecond;
        self
    }

    pub fn seconds(mut self) -> Self {
        self.unit = Unit::Second;
        self
    }

    pub fn minutes(mut self) -> Self {
        self.unit = Unit::Minute;
        self
    }

    pub fn hours(mut self) -> Self {
        self.unit = Unit::Hour;
        self
    }

    pub fn days(mut self) -> Self {
        self.unit = Unit::Day;
        self
    }

    pub fn weeks(mut self) -> Self {
        self.unit = Unit::Week;
        self
    }
}

/// Describes how often and at what wall-clock alignment a job repeats
///
/// Only `every`-based schedules re-arm after a run; `each` and day/time
/// schedules fire once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    /// Anchor of the most recent run; `None` means "now" at arm time
    pub last_run: Option<DateTime<Local>>,
    /// Free-form duration such as "2h3m"; when set it is the sole
    /// interval source and overrides every other field
    pub each: Option<String>,
    /// Fixed repetition (count and unit)
    pub every: Option<Repeat>,
    /// Weekday constraint for week and one-shot day/time schedules
    pub on: Option<Weekday>,
    /// Clock-time alignment
    pub at: Option<ClockPattern>,
}

impl Schedule {
    /// A repeating schedule firing every `repeat`
    pub fn every(repeat: Repeat) -> Self {
        Self {
            every: Some(repeat),
            ..Self::default()
        }
    }

    /// A one-shot schedule firing after the given free-form duration
    pub fn each(expr: impl Into<String>) -> Self {
        Self {
            each: Some(expr.into()),
            ..Self::default()
        }
    }

    /// An empty one-shot base for day/time schedules
    pub fn once() -> Self {
        Self::default()
    }

    /// Constrain the schedule to a weekday
    pub fn on(mut self, day: Weekday) -> Self {
        self.on = Some(day);
        self
    }

    /// Align the schedule to a clock-time pattern
    pub fn at(mut self, pattern: ClockPattern) -> Self {
        self.at = Some(pattern);
        self
    }

    /// Anchor the schedule at a known previous run
    pub fn anchor(mut self, last_run: DateTime<Local>) -> Self {
        self.last_run = Some(last_run);
        self
    }

    /// Whether the schedule re-arms itself after each run
    pub fn is_recurring(&self) -> bool {
        self.every.is_some()
    }

    /// Eager registration-time validation: the schedule must name an
    /// interval source and resolve to a non-zero duration against `now`
    pub fn validate(&self, now: DateTime<Local>) -> Result<(), ScheduleError> {
        if let Some(expr) = &self.each {
            let parsed = humantime::parse_duration(expr).map_err(|source| {
                ScheduleError::UnparseableEach {
                    expr: expr.clone(),
                    source,
                }
            })?;
            if parsed.is_zero() {
                return Err(ScheduleError::NeverFires);
            }
            return Ok(());
        }
        if self.every.is_none() && self.on.is_none() && self.at.is_none() {
            return Err(ScheduleError::Empty);
        }
        if self.interval(now).is_zero() {
            return Err(ScheduleError::NeverFires);
        }
        Ok(())
    }

    /// Raw interval implied by the schedule as of `anchor`, with no
    /// handling of already-elapsed occurrences. Zero means the schedule
    /// cannot resolve.
    pub fn interval(&self, anchor: DateTime<Local>) -> Duration {
        if let Some(expr) = &self.each {
            return humantime::parse_duration(expr).unwrap_or(Duration::ZERO);
        }
        let Some(Repeat { count, unit }) = self.every else {
            return self.day_and_clock_delta(anchor);
        };
        let n = u64::from(count.max(1));
        match unit {
            Unit::Millisecond => Duration::from_millis(n),
            Unit::Second => Duration::from_secs(n),
            Unit::Minute => Duration::from_secs(n * 60),
            // hourly schedules take only their minute alignment from `at`;
            // the pattern's hour half is ignored
            Unit::Hour => Duration::from_secs(n * 3600) + self.minute_delta(anchor),
            Unit::Day => Duration::from_secs(n * SECS_PER_DAY) + self.clock_delta(anchor),
            Unit::Week => {
                let days = n * 7 + self.weekday_delta(anchor);
                Duration::from_secs(days * SECS_PER_DAY) + self.clock_delta(anchor)
            }
        }
    }

    /// Wait from `now` until the next occurrence, strictly positive for
    /// any resolvable schedule. Occurrences that elapsed between `anchor`
    /// and `now` are treated as runs that already happened, so a stale
    /// anchor catches up to the next future occurrence instead of firing
    /// a burst of overdue runs.
    pub fn next(&self, anchor: DateTime<Local>, now: DateTime<Local>) -> Duration {
        let mut interval = self.interval(anchor);
        if interval.is_zero() {
            return Duration::ZERO;
        }
        loop {
            let fire = anchor + interval;
            if let Ok(wait) = (fire - now).to_std() {
                if !wait.is_zero() {
                    return wait;
                }
            }
            let step = self.interval(fire);
            if step.is_zero() {
                // a schedule that stops resolving mid-walk can never fire
                return Duration::ZERO;
            }
            interval += step;
        }
    }

    /// One-shot resolution: advance to the next matching weekday, then
    /// match the clock time from that shifted instant
    fn day_and_clock_delta(&self, anchor: DateTime<Local>) -> Duration {
        let day_shift = Duration::from_secs(self.weekday_delta(anchor) * SECS_PER_DAY);
        day_shift + self.clock_delta(anchor + day_shift)
    }

    /// Full clock-time delta of the `at` pattern, zero when unset
    fn clock_delta(&self, at: DateTime<Local>) -> Duration {
        self.at.map(|p| p.delta_from(at)).unwrap_or(Duration::ZERO)
    }

    /// Minute-only delta of the `at` pattern, zero when unset
    fn minute_delta(&self, at: DateTime<Local>) -> Duration {
        self.at
            .map(|p| p.minute_delta_from(at))
            .unwrap_or(Duration::ZERO)
    }

    /// Days until the next `on` weekday, zero when unset or when the
    /// anchor's weekday already matches
    fn weekday_delta(&self, anchor: DateTime<Local>) -> u64 {
        match self.on {
            None => 0,
            Some(day) => {
                let target = day.num_days_from_sunday();
                let current = anchor.weekday().num_days_from_sunday();
                u64::from((7 + target - current) % 7)
            }
        }
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
