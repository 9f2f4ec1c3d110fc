//! Validated clock configuration.

use crate::constants::{
    DEFAULT_AUDIO_SRC, DEFAULT_DUE_HOUR, DEFAULT_DUE_MINUTE, DEFAULT_THRESHOLDS, DEFAULT_TITLE,
    DEFAULT_WARNING_CLASSES, MINUTES_PER_DAY,
};
use crate::error::ConfigError;
use crate::time::DueTime;
use smallvec::SmallVec;

/// Reminder thresholds in minutes, strictly descending (e.g. 30, 15, 5).
///
/// Index 0 is the first reminder reached while counting down and is the one
/// that starts the dance once announced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thresholds(SmallVec<[i64; 4]>);

impl Thresholds {
    pub fn new(values: &[i64]) -> Result<Self, ConfigError> {
        if values.is_empty() {
            return Err(ConfigError::NoThresholds);
        }
        for &value in values {
            if !(0..MINUTES_PER_DAY).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { value });
            }
        }
        for (index, pair) in values.windows(2).enumerate() {
            if pair[1] >= pair[0] {
                return Err(ConfigError::ThresholdsNotDescending {
                    index: index + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
        }
        Ok(Self(SmallVec::from_slice(values)))
    }

    /// Parse a comma separated list such as `30,15,5`.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let values = input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>().map_err(|_| ConfigError::InvalidThreshold {
                    input: s.to_string(),
                })
            })
            .collect::<Result<SmallVec<[i64; 4]>, _>>()?;
        Self::new(&values)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, minutes: i64) -> bool {
        self.0.contains(&minutes)
    }

    /// The threshold whose announcement starts the dance.
    pub fn lead(&self) -> i64 {
        self.0[0]
    }

    /// Index of the most severe threshold already reached, scanning from the
    /// end of the list backward.
    pub fn severity_index(&self, minute_difference: i64) -> Option<usize> {
        self.0.iter().rposition(|&t| minute_difference <= t)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self(SmallVec::from_slice(&DEFAULT_THRESHOLDS))
    }
}

/// Which platform voice to use for announcements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VoicePreference {
    /// Platform default voice for the speech language.
    #[default]
    Default,
    /// A voice by its platform name; falls back to `Default` if absent.
    Named(String),
}

/// Validated clock settings. Built through `new` or `ConfigOverrides` so the
/// class list always lines up with the thresholds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    title: String,
    due: DueTime,
    thresholds: Thresholds,
    warning_classes: Vec<String>,
    voice: VoicePreference,
    audio_src: String,
}

impl ClockConfig {
    pub fn new(
        title: impl Into<String>,
        due: DueTime,
        thresholds: Thresholds,
        warning_classes: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if warning_classes.len() != thresholds.len() {
            return Err(ConfigError::ClassCountMismatch {
                thresholds: thresholds.len(),
                classes: warning_classes.len(),
            });
        }
        Ok(Self {
            title: title.into(),
            due,
            thresholds,
            warning_classes,
            voice: VoicePreference::Default,
            audio_src: DEFAULT_AUDIO_SRC.to_string(),
        })
    }

    pub fn with_voice(mut self, voice: VoicePreference) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_audio_src(mut self, src: impl Into<String>) -> Self {
        self.audio_src = src.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn due(&self) -> DueTime {
        self.due
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn warning_classes(&self) -> &[String] {
        &self.warning_classes
    }

    pub fn voice(&self) -> &VoicePreference {
        &self.voice
    }

    pub fn audio_src(&self) -> &str {
        &self.audio_src
    }

    /// Warning class for the given minute difference, if any threshold is reached.
    pub fn warning_class(&self, minute_difference: i64) -> Option<&str> {
        self.thresholds
            .severity_index(minute_difference)
            .and_then(|i| self.warning_classes.get(i))
            .map(String::as_str)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            due: DueTime {
                hour: DEFAULT_DUE_HOUR,
                minute: DEFAULT_DUE_MINUTE,
            },
            thresholds: Thresholds::default(),
            warning_classes: DEFAULT_WARNING_CLASSES
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            voice: VoicePreference::Default,
            audio_src: DEFAULT_AUDIO_SRC.to_string(),
        }
    }
}

/// Split a comma separated class list such as `warn,second-warn,error`.
pub fn parse_class_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Overrides supplied by the host page; unset fields keep the defaults.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub title: Option<String>,
    pub due: Option<String>,
    pub thresholds: Option<String>,
    pub warning_classes: Option<String>,
    pub voice: Option<String>,
    pub audio_src: Option<String>,
}

impl ConfigOverrides {
    pub fn into_config(self) -> Result<ClockConfig, ConfigError> {
        let defaults = ClockConfig::default();
        let due = match self.due {
            Some(s) => DueTime::parse(&s)?,
            None => defaults.due,
        };
        let thresholds = match self.thresholds {
            Some(s) => Thresholds::parse(&s)?,
            None => defaults.thresholds,
        };
        let warning_classes = match self.warning_classes {
            Some(s) => parse_class_list(&s),
            None => defaults.warning_classes,
        };
        let voice = match self.voice.filter(|v| !v.trim().is_empty()) {
            Some(name) => VoicePreference::Named(name.trim().to_string()),
            None => VoicePreference::Default,
        };
        let config = ClockConfig::new(
            self.title.unwrap_or(defaults.title),
            due,
            thresholds,
            warning_classes,
        )?
        .with_voice(voice);
        Ok(match self.audio_src {
            Some(src) => config.with_audio_src(src),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeParseError;

    #[test]
    fn default_config_matches_lab_defaults() {
        let c = ClockConfig::default();
        assert_eq!(c.title(), "Lab 2");
        assert_eq!(c.due(), DueTime { hour: 21, minute: 30 });
        assert_eq!(c.thresholds().as_slice(), &[30, 15, 5]);
        assert_eq!(c.warning_classes(), ["warn", "second-warn", "error"]);
        assert_eq!(c.audio_src(), "/rythmC.mp3");
    }

    #[test]
    fn thresholds_must_descend() {
        assert_eq!(
            Thresholds::new(&[5, 15, 30]),
            Err(ConfigError::ThresholdsNotDescending {
                index: 1,
                previous: 5,
                current: 15
            })
        );
        // Duplicates are not strictly descending
        assert!(matches!(
            Thresholds::new(&[30, 15, 15]),
            Err(ConfigError::ThresholdsNotDescending { index: 2, .. })
        ));
        assert_eq!(Thresholds::new(&[]), Err(ConfigError::NoThresholds));
    }

    #[test]
    fn thresholds_must_fit_in_a_day() {
        assert_eq!(
            Thresholds::new(&[1440]),
            Err(ConfigError::ThresholdOutOfRange { value: 1440 })
        );
        assert_eq!(
            Thresholds::new(&[10, -1]),
            Err(ConfigError::ThresholdOutOfRange { value: -1 })
        );
        assert!(Thresholds::new(&[1439, 0]).is_ok());
    }

    #[test]
    fn thresholds_parse_from_list() {
        let t = Thresholds::parse(" 45, 20 ,10").unwrap();
        assert_eq!(t.as_slice(), &[45, 20, 10]);
        assert_eq!(t.lead(), 45);
        assert_eq!(
            Thresholds::parse("30,x"),
            Err(ConfigError::InvalidThreshold {
                input: "x".to_string()
            })
        );
    }

    #[test]
    fn warning_class_picks_most_severe_reached() {
        let c = ClockConfig::default();
        assert_eq!(c.warning_class(5), Some("error"));
        assert_eq!(c.warning_class(0), Some("error"));
        assert_eq!(c.warning_class(6), Some("second-warn"));
        assert_eq!(c.warning_class(15), Some("second-warn"));
        assert_eq!(c.warning_class(20), Some("warn"));
        assert_eq!(c.warning_class(30), Some("warn"));
        assert_eq!(c.warning_class(31), None);
    }

    #[test]
    fn class_count_must_match() {
        let err = ClockConfig::new(
            "x",
            DueTime { hour: 1, minute: 0 },
            Thresholds::default(),
            vec!["warn".to_string()],
        );
        assert_eq!(
            err,
            Err(ConfigError::ClassCountMismatch {
                thresholds: 3,
                classes: 1
            })
        );
    }

    #[test]
    fn validated_config_keeps_one_class_per_threshold() {
        let config = ConfigOverrides {
            thresholds: Some("20,10".to_string()),
            warning_classes: Some("warn, error".to_string()),
            ..Default::default()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.thresholds().len(), config.warning_classes().len());
        assert_eq!(config.warning_class(10), Some("error"));
        assert_eq!(config.warning_class(20), Some("warn"));

        let with_extras = config.with_voice(VoicePreference::Default).with_audio_src("/a.mp3");
        assert_eq!(with_extras.warning_classes(), ["warn", "error"]);
        assert_eq!(with_extras.audio_src(), "/a.mp3");
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let config = ConfigOverrides {
            title: Some("Essay".to_string()),
            due: Some("9:15".to_string()),
            voice: Some("Samantha".to_string()),
            ..Default::default()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.title(), "Essay");
        assert_eq!(config.due(), DueTime { hour: 9, minute: 15 });
        assert_eq!(config.thresholds(), &Thresholds::default());
        assert_eq!(config.voice(), &VoicePreference::Named("Samantha".to_string()));
    }

    #[test]
    fn overrides_fail_fast_on_bad_input() {
        let bad_due = ConfigOverrides {
            due: Some("late".to_string()),
            ..Default::default()
        };
        assert_eq!(
            bad_due.into_config(),
            Err(ConfigError::InvalidDue(TimeParseError::InvalidTimeFormat {
                input: "late".to_string()
            }))
        );

        let mismatched = ConfigOverrides {
            thresholds: Some("20,10".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            mismatched.into_config(),
            Err(ConfigError::ClassCountMismatch { .. })
        ));
    }
}
