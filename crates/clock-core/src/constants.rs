// Shared timing and default values used by both the core and the web frontend.

// Millisecond spans used by the countdown arithmetic
pub const DAY_MS: i64 = 86_400_000;
pub const HOUR_MS: i64 = 3_600_000;
pub const MINUTE_MS: i64 = 60_000;

// Minutes in a day; the minute difference always lands in 0..MINUTES_PER_DAY
pub const MINUTES_PER_DAY: i64 = 1_440;

// Due times are pinned to the last second of their minute
pub const DUE_SECOND: u32 = 59;

// Defaults applied when the page does not override them
pub const DEFAULT_TITLE: &str = "Lab 2";
pub const DEFAULT_DUE_HOUR: u32 = 21;
pub const DEFAULT_DUE_MINUTE: u32 = 30;
pub const DEFAULT_THRESHOLDS: [i64; 3] = [30, 15, 5];
pub const DEFAULT_WARNING_CLASSES: [&str; 3] = ["warn", "second-warn", "error"];
pub const DEFAULT_AUDIO_SRC: &str = "/rythmC.mp3";

// Speech
pub const SPEECH_LANG: &str = "en-US";
pub const SPEECH_VOLUME: f32 = 1.0;

// Ledger flag value written for an announced reminder
pub const ANNOUNCED_SENTINEL: &str = "true";

// Dance pulse pattern ("vanish" over the lowest analyser bins)
pub const DANCE_PATTERN_ID: &str = "vanish";
pub const DANCE_PATTERN_CLASS: &str = "vanish";
pub const DANCE_PATTERN_START_BIN: usize = 0;
pub const DANCE_PATTERN_BIN_COUNT: usize = 10;

// Countdown phrase shown once the due minute is reached
pub const DUE_REACHED_PHRASE: &str = "Beep beep!";
