//! Background music with a beat-driven pulse on the page.

use crate::constants::{
    DANCE_PATTERN_BIN_COUNT, DANCE_PATTERN_CLASS, DANCE_PATTERN_ID, DANCE_PATTERN_START_BIN,
};
use crate::error::DanceError;

/// A named pulse applied to every element carrying `class`.
///
/// The pulse level is the mean of analyser bins
/// `start_bin..start_bin + bin_count`, normalized to `0..=1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PulsePattern {
    pub id: String,
    pub class: String,
    pub start_bin: usize,
    pub bin_count: usize,
}

impl PulsePattern {
    /// Elements fade out on each bass hit.
    pub fn vanish() -> Self {
        Self {
            id: DANCE_PATTERN_ID.to_string(),
            class: DANCE_PATTERN_CLASS.to_string(),
            start_bin: DANCE_PATTERN_START_BIN,
            bin_count: DANCE_PATTERN_BIN_COUNT,
        }
    }

    /// Pulse level for one frame of byte frequency data. Bins past the end count as silence.
    pub fn level(&self, bins: &[u8]) -> f32 {
        if self.bin_count == 0 {
            return 0.0;
        }
        let sum: u32 = bins
            .iter()
            .skip(self.start_bin)
            .take(self.bin_count)
            .map(|&b| u32::from(b))
            .sum();
        sum as f32 / (self.bin_count as f32 * 255.0)
    }

    /// Opacity for the `vanish` pulse.
    pub fn opacity(&self, bins: &[u8]) -> f32 {
        (1.0 - self.level(bins)).clamp(0.0, 1.0)
    }
}

/// Background audio and pulse animation. One instance per page.
pub trait DanceController {
    fn register_pattern(&mut self, pattern: PulsePattern);
    fn start(&mut self) -> Result<(), DanceError>;
    fn stop(&mut self);
}
