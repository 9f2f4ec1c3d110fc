//! Wall-clock moments and the countdown arithmetic.
//!
//! Timestamps are milliseconds since the Unix epoch. The local breakdown
//! (hour/minute/second) is carried alongside so the display never has to
//! know about time zones; the platform fills it in.

use crate::constants::{DAY_MS, DUE_SECOND, HOUR_MS, MINUTE_MS};
use crate::error::TimeParseError;
use std::fmt;

/// A point in time with its local wall-clock breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Moment {
    pub epoch_ms: i64,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Source of "now" and of same-day wall-clock moments.
pub trait LocalClock {
    fn now(&self) -> Moment;

    /// Today (local date) at the given wall-clock time, milliseconds zeroed.
    fn today_at(&self, hour: u32, minute: u32, second: u32) -> Moment;
}

/// Whole minutes from `now_ms` until `due_ms`, wrapped into one day.
///
/// Uses floored modulo, so the result is always in `0..1440`: a due time
/// already passed today counts toward the same time tomorrow.
pub fn minutes_until_due(due_ms: i64, now_ms: i64) -> i64 {
    let wrapped = (due_ms - now_ms).rem_euclid(DAY_MS);
    (wrapped / HOUR_MS) * 60 + (wrapped % HOUR_MS) / MINUTE_MS
}

/// Hour and minute of a due time as typed into the settings form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DueTime {
    pub hour: u32,
    pub minute: u32,
}

impl DueTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(TimeParseError::InvalidTimeFormat {
                input: format!("{hour}:{minute:02}"),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Accepts `H:MM` or `HH:MM` (24-hour), surrounding whitespace ignored.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        let invalid = || TimeParseError::InvalidTimeFormat {
            input: input.to_string(),
        };
        let (h, m) = input.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(Self { hour, minute })
    }

    /// Resolve to today's moment, seconds pinned to :59.
    pub fn resolve(self, clock: &impl LocalClock) -> Moment {
        clock.today_at(self.hour, self.minute, DUE_SECOND)
    }

    pub fn of(moment: &Moment) -> Self {
        Self {
            hour: moment.hour,
            minute: moment.minute,
        }
    }
}

impl fmt::Display for DueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// en-US long time, e.g. `9:30:59 PM`. Midnight and noon read `12`.
pub fn format_due_label(moment: &Moment) -> String {
    let hour12 = match moment.hour % 12 {
        0 => 12,
        h => h,
    };
    let meridiem = if moment.hour >= 12 { "PM" } else { "AM" };
    format!(
        "{}:{:02}:{:02} {}",
        hour12, moment.minute, moment.second, meridiem
    )
}
