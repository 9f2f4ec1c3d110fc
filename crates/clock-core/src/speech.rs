//! Text-to-speech capability and voice selection.

use crate::config::VoicePreference;
use crate::constants::{SPEECH_LANG, SPEECH_VOLUME};
use crate::error::SpeechError;

/// One utterance handed to the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: &'static str,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: SPEECH_LANG,
            volume: SPEECH_VOLUME,
        }
    }
}

/// Description of a platform voice, as enumerated by the speech service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceInfo {
    pub name: String,
    pub lang: String,
    pub is_default: bool,
}

/// Platform speech service.
///
/// `speak` only queues the utterance. The platform later reports the end
/// of the utterance (or its failure) back to the application exactly once,
/// via `ClockApp::on_speech_end` / `ClockApp::on_speech_error`.
pub trait Speaker {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;

    /// Drop anything queued or playing. Late completions must be ignored by the caller.
    fn cancel(&mut self);
}

/// Pick a voice: the named one if present, else the default voice for
/// `lang`, else any voice for `lang`. `None` leaves the platform default.
pub fn select_voice(voices: &[VoiceInfo], preference: &VoicePreference, lang: &str) -> Option<usize> {
    if let VoicePreference::Named(name) = preference {
        if let Some(i) = voices.iter().position(|v| v.name == *name) {
            return Some(i);
        }
        log::warn!("[speech] voice {name:?} not found, using default");
    }
    let matches_lang = |v: &VoiceInfo| v.lang.eq_ignore_ascii_case(lang);
    voices
        .iter()
        .position(|v| v.is_default && matches_lang(v))
        .or_else(|| voices.iter().position(matches_lang))
}
