//! `window.speechSynthesis` behind the core `Speaker` capability.

use clock_core::{select_voice, Speaker, SpeechError, Utterance, VoiceInfo, VoicePreference};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Completion reports from the platform.
#[derive(Debug)]
pub enum SpeechEvent {
    End,
    Error(SpeechError),
}

/// Receiver for speech events, filled in once the app exists.
pub type SpeechSink = Rc<RefCell<Option<Box<dyn Fn(SpeechEvent)>>>>;

fn emit(sink: &SpeechSink, event: SpeechEvent) {
    if let Some(f) = sink.borrow().as_ref() {
        f(event);
    }
}

// Kept alive until the next utterance replaces them.
struct UtteranceHandlers {
    utterance: web::SpeechSynthesisUtterance,
    _on_end: Closure<dyn FnMut(web::Event)>,
    _on_error: Closure<dyn FnMut(web::SpeechSynthesisErrorEvent)>,
}

pub struct WebSpeaker {
    synth: Option<web::SpeechSynthesis>,
    voice: VoicePreference,
    sink: SpeechSink,
    handlers: Option<UtteranceHandlers>,
}

impl WebSpeaker {
    pub fn new(window: &web::Window, voice: VoicePreference, sink: SpeechSink) -> Self {
        let synth = match window.speech_synthesis() {
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("[speech] speechSynthesis unavailable: {:?}", e);
                None
            }
        };
        Self {
            synth,
            voice,
            sink,
            handlers: None,
        }
    }

    fn pick_voice(&self, synth: &web::SpeechSynthesis, lang: &str) -> Option<web::SpeechSynthesisVoice> {
        let voices: Vec<web::SpeechSynthesisVoice> = synth
            .get_voices()
            .iter()
            .filter_map(|v| v.dyn_into::<web::SpeechSynthesisVoice>().ok())
            .collect();
        let infos: Vec<VoiceInfo> = voices
            .iter()
            .map(|v| VoiceInfo {
                name: v.name(),
                lang: v.lang(),
                is_default: v.default(),
            })
            .collect();
        select_voice(&infos, &self.voice, lang).and_then(|i| voices.get(i).cloned())
    }
}

impl Speaker for WebSpeaker {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let synth = self.synth.as_ref().ok_or(SpeechError::Unavailable)?;
        let msg = web::SpeechSynthesisUtterance::new_with_text(&utterance.text).map_err(|e| {
            SpeechError::Failed {
                reason: format!("{:?}", e),
            }
        })?;
        msg.set_lang(utterance.lang);
        msg.set_volume(utterance.volume);
        if let Some(voice) = self.pick_voice(synth, utterance.lang) {
            msg.set_voice(Some(&voice));
        }

        let sink_end = self.sink.clone();
        let on_end = Closure::wrap(Box::new(move |_ev: web::Event| {
            emit(&sink_end, SpeechEvent::End);
        }) as Box<dyn FnMut(web::Event)>);
        let sink_err = self.sink.clone();
        let on_error = Closure::wrap(Box::new(move |ev: web::SpeechSynthesisErrorEvent| {
            emit(
                &sink_err,
                SpeechEvent::Error(SpeechError::Failed {
                    reason: format!("{:?}", ev.error()),
                }),
            );
        }) as Box<dyn FnMut(web::SpeechSynthesisErrorEvent)>);
        msg.set_onend(Some(on_end.as_ref().unchecked_ref()));
        msg.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        synth.speak(&msg);
        log::info!("[speech] {}", utterance.text);
        self.handlers = Some(UtteranceHandlers {
            utterance: msg,
            _on_end: on_end,
            _on_error: on_error,
        });
        Ok(())
    }

    fn cancel(&mut self) {
        // Detach first: cancelling fires error events we no longer want
        if let Some(h) = &self.handlers {
            h.utterance.set_onend(None);
            h.utterance.set_onerror(None);
        }
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}
