// Capability doubles shared by the integration tests.

#![allow(dead_code)]

use clock_core::constants::{DAY_MS, HOUR_MS, MINUTE_MS};
use clock_core::{
    DanceController, DanceError, KeyValueStore, LocalClock, MemoryStore, Moment, PulsePattern,
    Speaker, SpeechError, StoreError, Utterance,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// Some UTC midnight; the tests pretend local time is UTC.
pub const DAY_START_MS: i64 = 19_000 * DAY_MS;

pub fn at(hour: i64, minute: i64, second: i64) -> i64 {
    DAY_START_MS + hour * HOUR_MS + minute * MINUTE_MS + second * 1_000
}

pub struct ManualClock {
    now_ms: Cell<i64>,
}

impl ManualClock {
    pub fn at(hour: i64, minute: i64, second: i64) -> Self {
        Self {
            now_ms: Cell::new(at(hour, minute, second)),
        }
    }

    pub fn set(&self, hour: i64, minute: i64, second: i64) {
        self.now_ms.set(at(hour, minute, second));
    }

    pub fn advance_secs(&self, secs: i64) {
        self.now_ms.set(self.now_ms.get() + secs * 1_000);
    }

    fn moment(epoch_ms: i64) -> Moment {
        let in_day = epoch_ms.rem_euclid(DAY_MS);
        Moment {
            epoch_ms,
            hour: (in_day / HOUR_MS) as u32,
            minute: ((in_day % HOUR_MS) / MINUTE_MS) as u32,
            second: ((in_day % MINUTE_MS) / 1_000) as u32,
        }
    }
}

impl LocalClock for ManualClock {
    fn now(&self) -> Moment {
        Self::moment(self.now_ms.get())
    }

    fn today_at(&self, hour: u32, minute: u32, second: u32) -> Moment {
        let now = self.now_ms.get();
        let midnight = now - now.rem_euclid(DAY_MS);
        Self::moment(
            midnight
                + i64::from(hour) * HOUR_MS
                + i64::from(minute) * MINUTE_MS
                + i64::from(second) * 1_000,
        )
    }
}

#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Vec<Utterance>,
    pub cancels: usize,
    pub unavailable: bool,
}

impl RecordingSpeaker {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        if self.unavailable {
            return Err(SpeechError::Unavailable);
        }
        self.spoken.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

#[derive(Default)]
pub struct RecordingDance {
    pub patterns: Vec<PulsePattern>,
    pub starts: usize,
    pub stops: usize,
    pub broken: bool,
}

impl RecordingDance {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }
}

impl DanceController for RecordingDance {
    fn register_pattern(&mut self, pattern: PulsePattern) {
        self.patterns.push(pattern);
    }

    fn start(&mut self) -> Result<(), DanceError> {
        if self.broken {
            return Err(DanceError::AudioUnavailable {
                reason: "no audio element".to_string(),
            });
        }
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}

/// A session store that outlives a single app instance.
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl KeyValueStore for SharedStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.borrow().get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().set_item(key, value)
    }
}
