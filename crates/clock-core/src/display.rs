//! Clock face formatting.

use crate::time::Moment;

/// Text of the clock face for one moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockFace {
    pub hour: String,
    pub minute: String,
    pub second: String,
    pub meridiem: &'static str,
}

impl ClockFace {
    /// Midnight and noon show `00`: the hour is taken modulo 12 as-is.
    pub fn from_moment(moment: &Moment) -> Self {
        Self {
            hour: pad(moment.hour % 12, 2),
            minute: pad(moment.minute, 2),
            second: pad(moment.second, 2),
            meridiem: if moment.hour >= 12 { "PM" } else { "AM" },
        }
    }
}

#[inline]
pub fn pad(n: u32, width: usize) -> String {
    format!("{n:0>width$}")
}
