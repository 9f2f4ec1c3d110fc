/// Page wiring and timing constants for the web frontend.
///
/// Element ids and class names match the stylesheet shipped with the page;
/// keep them in sync when renaming.
// Element the clock mounts into
pub const MOUNT_ELEMENT_ID: &str = "clock-app";

// Timer period for the clock tick (milliseconds)
pub const TICK_INTERVAL_MS: i32 = 1000;

// data-* attributes read from the mount element
pub const ATTR_TITLE: &str = "data-title";
pub const ATTR_DUE: &str = "data-due";
pub const ATTR_REMINDERS: &str = "data-reminders";
pub const ATTR_REMINDER_CLASSES: &str = "data-reminder-classes";
pub const ATTR_VOICE: &str = "data-voice";
pub const ATTR_AUDIO: &str = "data-audio";

// Settings form inputs
pub const TITLE_INPUT_ID: &str = "title";
pub const DUE_INPUT_ID: &str = "due";

// Classes toggled at runtime
pub const HIDDEN_CLASS: &str = "hidden";
pub const DANCING_CLASS: &str = "dancing";

// Wrapper classes around the clock face; "vanish" is the pulse target
pub const PULSE_WRAPPER_CLASSES: &str = "rythm-bass rythm vanish";

// Analyser resolution for the dance pulse (bins = FFT_SIZE / 2)
pub const ANALYSER_FFT_SIZE: u32 = 256;

// Hint line pieces
pub const DUE_PREFIX: &str = "Due: ";
pub const DUE_SEPARATOR: &str = " - ";
