use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: u64 = 60;

/// Interval offered in the minutes field on a fresh screen.
pub const DEFAULT_MINUTES: Minutes = Minutes(25);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("interval is empty")]
    Empty,
    #[error("{0:?} is not a number of minutes")]
    NotANumber(String),
    #[error("interval must be greater than zero")]
    NotPositive,
    #[error("{0:?} minutes is too large")]
    TooLarge(String),
}

/// A validated, strictly positive interval length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Minutes(u32);

impl Minutes {
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Minutes(value)) }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn as_seconds(self) -> u64 {
        u64::from(self.0) * SECONDS_PER_MINUTE
    }

    /// Cycle length handed to the countdown engine.
    pub fn cycle(self) -> NonZeroU64 {
        NonZeroU64::new(self.as_seconds()).unwrap_or(NonZeroU64::MIN)
    }
}

impl Default for Minutes {
    fn default() -> Self {
        DEFAULT_MINUTES
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u32> for Minutes {
    type Error = ValidationError;
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Minutes::new(value).ok_or(ValidationError::NotPositive)
    }
}

impl From<Minutes> for u32 {
    fn from(value: Minutes) -> Self {
        value.0
    }
}

impl FromStr for Minutes {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_minutes(s)
    }
}

/// Parses the minutes field.
///
/// Leading whitespace and an optional sign are accepted, then the longest
/// run of digits is taken and the rest of the text is ignored, so `"12abc"`
/// and `"12.5"` both read as twelve minutes. A `0x` prefix switches to
/// hexadecimal digits.
pub fn parse_minutes(input: &str) -> Result<Minutes, ValidationError> {
    let text = input.trim_start();
    if text.trim_end().is_empty() {
        return Err(ValidationError::Empty);
    }

    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, body) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let digits_end = body
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(body.len());
    let digits = &body[..digits_end];
    if digits.is_empty() {
        return Err(ValidationError::NotANumber(input.to_string()));
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() || negative {
        return Err(ValidationError::NotPositive);
    }
    let value = u32::from_str_radix(significant, radix)
        .map_err(|_| ValidationError::TooLarge(digits.to_string()))?;
    Minutes::try_from(value)
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
}

impl TimerState {
    pub fn is_running(self) -> bool {
        self == TimerState::Running
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerState::Idle => f.write_str("idle"),
            TimerState::Running => f.write_str("running"),
        }
    }
}

/// Renders seconds as `MM:SS`. Minutes do not wrap at the hour.
pub fn format_time(seconds: u64) -> String {
    let mins = seconds / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;
    format!("{mins:02}:{secs:02}")
}
