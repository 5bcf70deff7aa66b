// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock-time wildcard patterns
//!
//! A `ClockPattern` is an `HH:MM` template where the hour half may be `**`
//! and the tens digit of the minute may be `*`. A wildcard hour matches the
//! current hour; a wildcard minute tens digit matches within the current
//! ten-minute band, so `**:*5` means "the next minute ending in 5".

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors from parsing a clock-time pattern
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("clock pattern must look like HH:MM, got {0:?}")]
    Malformed(String),
    #[error("hour out of range in clock pattern: {0}")]
    HourOutOfRange(u32),
    #[error("minute out of range in clock pattern: {0}")]
    MinuteOutOfRange(u32),
}

/// The minute half of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MinuteRule {
    /// Literal minute 00-59
    Exact(u32),
    /// `*D`: the next minute whose units digit is D
    UnitsDigit(u32),
}

/// A validated `HH:MM` wildcard pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockPattern {
    /// None when the hour half is `**`
    hour: Option<u32>,
    minute: MinuteRule,
}

impl ClockPattern {
    /// Hours and minutes until the pattern next matches, measured from
    /// `at`. Zero when `at` already matches.
    pub fn delta_from(&self, at: DateTime<Local>) -> Duration {
        let hours = match self.hour {
            Some(hour) => u64::from((hour + 24 - at.hour()) % 24),
            None => 0,
        };
        Duration::from_secs(hours * 3600) + self.minute_delta_from(at)
    }

    /// Minute-only delta, ignoring the hour half of the pattern
    pub fn minute_delta_from(&self, at: DateTime<Local>) -> Duration {
        let minutes = match self.minute {
            MinuteRule::Exact(minute) => u64::from((minute + 60 - at.minute()) % 60),
            MinuteRule::UnitsDigit(digit) => u64::from((digit + 10 - at.minute() % 10) % 10),
        };
        Duration::from_secs(minutes * 60)
    }
}

/// Parse a two-character half as a literal number; both characters must
/// be ascii digits
fn two_digits(half: &str) -> Option<u32> {
    let mut chars = half.chars();
    let tens = chars.next()?.to_digit(10)?;
    let units = chars.next()?.to_digit(10)?;
    Some(tens * 10 + units)
}

impl FromStr for ClockPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PatternError::Malformed(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(malformed());
        }

        let hour = match &s[0..2] {
            "**" => None,
            half => {
                let hour = two_digits(half).ok_or_else(malformed)?;
                if hour > 23 {
                    return Err(PatternError::HourOutOfRange(hour));
                }
                Some(hour)
            }
        };

        let minute = match (bytes[3], bytes[4]) {
            (b'*', units @ b'0'..=b'9') => MinuteRule::UnitsDigit(u32::from(units - b'0')),
            _ => {
                let minute = two_digits(&s[3..5]).ok_or_else(malformed)?;
                if minute > 59 {
                    return Err(PatternError::MinuteOutOfRange(minute));
                }
                MinuteRule::Exact(minute)
            }
        };

        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hour {
            Some(hour) => write!(f, "{hour:02}")?,
            None => f.write_str("**")?,
        }
        match self.minute {
            MinuteRule::Exact(minute) => write!(f, ":{minute:02}"),
            MinuteRule::UnitsDigit(digit) => write!(f, ":*{digit}"),
        }
    }
}

impl TryFrom<String> for ClockPattern {
    type Error = PatternError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ClockPattern> for String {
    fn from(pattern: ClockPattern) -> Self {
        pattern.to_string()
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
