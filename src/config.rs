use crate::constants::{
    ATTR_AUDIO, ATTR_DUE, ATTR_REMINDERS, ATTR_REMINDER_CLASSES, ATTR_TITLE, ATTR_VOICE,
};
use clock_core::{ClockConfig, ConfigError, ConfigOverrides};
use web_sys as web;

/// Build the clock configuration from `data-*` attributes on the mount element.
pub fn read_config(root: &web::Element) -> Result<ClockConfig, ConfigError> {
    let overrides = ConfigOverrides {
        title: root.get_attribute(ATTR_TITLE),
        due: root.get_attribute(ATTR_DUE),
        thresholds: root.get_attribute(ATTR_REMINDERS),
        warning_classes: root.get_attribute(ATTR_REMINDER_CLASSES),
        voice: root.get_attribute(ATTR_VOICE),
        audio_src: root.get_attribute(ATTR_AUDIO),
    };
    overrides.into_config()
}
