//! Background music and the analyser-driven pulse for the dance.

use crate::constants::ANALYSER_FFT_SIZE;
use crate::dom;
use clock_core::{DanceController, DanceError, PulsePattern};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Playback reports that arrive after `start` has returned.
#[derive(Debug)]
pub enum DanceEvent {
    Failed(DanceError),
}

/// Receiver for dance events, filled in once the app exists.
pub type DanceSink = Rc<RefCell<Option<Box<dyn Fn(DanceEvent)>>>>;

fn emit(sink: &DanceSink, event: DanceEvent) {
    if let Some(f) = sink.borrow().as_ref() {
        f(event);
    }
}

struct PulseState {
    running: Cell<bool>,
    // Pending requestAnimationFrame handle
    scheduled: Cell<Option<i32>>,
    analyser: web::AnalyserNode,
    bins: RefCell<Vec<u8>>,
    patterns: Rc<RefCell<Vec<PulsePattern>>>,
}

impl PulseState {
    fn sample_and_apply(&self) {
        let mut bins = self.bins.borrow_mut();
        self.analyser.get_byte_frequency_data(&mut bins);
        for pattern in self.patterns.borrow().iter() {
            let opacity = pattern.opacity(&bins);
            for_each_with_class(&pattern.class, |el| {
                _ = el.style().set_property("opacity", &format!("{:.3}", opacity));
            });
        }
    }

    fn restore(&self) {
        for pattern in self.patterns.borrow().iter() {
            for_each_with_class(&pattern.class, |el| {
                _ = el.style().remove_property("opacity");
            });
        }
    }
}

fn for_each_with_class(class: &str, mut f: impl FnMut(&web::HtmlElement)) {
    let Some(document) = dom::window_document() else {
        return;
    };
    let elements = document.get_elements_by_class_name(class);
    for i in 0..elements.length() {
        if let Some(el) = elements.item(i) {
            if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
                f(html);
            }
        }
    }
}

struct Player {
    audio: web::HtmlAudioElement,
    ctx: web::AudioContext,
    _source: web::MediaElementAudioSourceNode,
    pulse: Rc<PulseState>,
    frame: FrameSlot,
}

fn dance_err(reason: &str, e: wasm_bindgen::JsValue) -> DanceError {
    DanceError::AudioUnavailable {
        reason: format!("{}: {:?}", reason, e),
    }
}

impl Player {
    fn build(src: &str, patterns: Rc<RefCell<Vec<PulsePattern>>>) -> Result<Self, DanceError> {
        let audio =
            web::HtmlAudioElement::new_with_src(src).map_err(|e| dance_err("audio element", e))?;
        audio.set_loop(true);
        let ctx = web::AudioContext::new().map_err(|e| dance_err("AudioContext", e))?;
        let source = ctx
            .create_media_element_source(&audio)
            .map_err(|e| dance_err("media source", e))?;
        let analyser = web::AnalyserNode::new(&ctx).map_err(|e| dance_err("AnalyserNode", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| dance_err("connect source", e))?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| dance_err("connect analyser", e))?;

        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        let pulse = Rc::new(PulseState {
            running: Cell::new(false),
            scheduled: Cell::new(None),
            analyser,
            bins: RefCell::new(bins),
            patterns,
        });
        let frame: FrameSlot = Rc::new(RefCell::new(None));
        let weak_pulse: Weak<PulseState> = Rc::downgrade(&pulse);
        let weak_frame = Rc::downgrade(&frame);
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let (Some(pulse), Some(frame)) = (weak_pulse.upgrade(), weak_frame.upgrade()) else {
                return;
            };
            pulse.scheduled.set(None);
            if !pulse.running.get() {
                return;
            }
            pulse.sample_and_apply();
            request_frame(&frame, &pulse);
        }) as Box<dyn FnMut()>));

        Ok(Self {
            audio,
            ctx,
            _source: source,
            pulse,
            frame,
        })
    }
}

fn request_frame(frame: &FrameSlot, pulse: &PulseState) {
    if pulse.scheduled.get().is_some() {
        return;
    }
    if let (Some(w), Some(cb)) = (web::window(), frame.borrow().as_ref()) {
        if let Ok(handle) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            pulse.scheduled.set(Some(handle));
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        _ = self.audio.pause();
        if let (Some(w), Some(handle)) = (web::window(), self.pulse.scheduled.take()) {
            _ = w.cancel_animation_frame(handle);
        }
        _ = self.ctx.close();
    }
}

/// Looping background track plus the pulse loop. Built on first start.
pub struct WebDance {
    src: String,
    patterns: Rc<RefCell<Vec<PulsePattern>>>,
    player: Option<Player>,
    sink: DanceSink,
    // Bumped on every start and stop; a rejection only counts for its own start
    generation: Rc<Cell<u32>>,
}

impl WebDance {
    pub fn new(src: impl Into<String>, sink: DanceSink) -> Self {
        Self {
            src: src.into(),
            patterns: Rc::new(RefCell::new(Vec::new())),
            player: None,
            sink,
            generation: Rc::new(Cell::new(0)),
        }
    }

    fn next_generation(&self) -> u32 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }
}

impl DanceController for WebDance {
    fn register_pattern(&mut self, pattern: PulsePattern) {
        let mut patterns = self.patterns.borrow_mut();
        match patterns.iter_mut().find(|p| p.id == pattern.id) {
            Some(existing) => *existing = pattern,
            None => patterns.push(pattern),
        }
    }

    fn start(&mut self) -> Result<(), DanceError> {
        if self.player.is_none() {
            self.player = Some(Player::build(&self.src, self.patterns.clone())?);
        }
        let Some(player) = &self.player else {
            return Err(DanceError::AudioUnavailable {
                reason: "player not built".to_string(),
            });
        };
        _ = player.ctx.resume();
        let play = player.audio.play().map_err(|e| DanceError::PlaybackFailed {
            reason: format!("{:?}", e),
        })?;
        // Autoplay or decode failures arrive asynchronously
        let started = self.next_generation();
        let generation = self.generation.clone();
        let sink = self.sink.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(play).await {
                log::warn!("[dance] playback rejected: {:?}", e);
                if generation.get() == started {
                    emit(
                        &sink,
                        DanceEvent::Failed(DanceError::PlaybackFailed {
                            reason: format!("{:?}", e),
                        }),
                    );
                }
            }
        });
        player.pulse.running.set(true);
        request_frame(&player.frame, &player.pulse);
        Ok(())
    }

    fn stop(&mut self) {
        self.next_generation();
        if let Some(player) = &self.player {
            _ = player.audio.pause();
            player.pulse.running.set(false);
            player.pulse.restore();
        }
    }
}
