use thiserror::Error;

/// Due-time text from the settings form could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("invalid time format {input:?}, expected H:MM or HH:MM")]
    InvalidTimeFormat { input: String },
}

/// Rejected clock configuration. Raised once at construction, never per tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one reminder threshold is required")]
    NoThresholds,

    #[error("reminder thresholds must be strictly descending: {current} at index {index} follows {previous}")]
    ThresholdsNotDescending {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("reminder threshold {value} is outside 0..=1439 minutes")]
    ThresholdOutOfRange { value: i64 },

    #[error("{thresholds} reminder thresholds but {classes} warning classes")]
    ClassCountMismatch { thresholds: usize, classes: usize },

    #[error("could not parse reminder threshold {input:?}")]
    InvalidThreshold { input: String },

    #[error("invalid due time: {0}")]
    InvalidDue(#[from] TimeParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech synthesis is not available")]
    Unavailable,

    #[error("speech synthesis failed: {reason}")]
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DanceError {
    #[error("dance audio unavailable: {reason}")]
    AudioUnavailable { reason: String },

    #[error("dance playback failed: {reason}")]
    PlaybackFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to write {key:?}: {reason}")]
    WriteFailed { key: String, reason: String },
}
