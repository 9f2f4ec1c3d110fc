//! The clock application: state, per-second tick and user actions.
//!
//! Platform services come in as capabilities so the whole flow runs on the
//! host in tests. The web frontend owns the timer and event listeners and
//! forwards them here.

use crate::announce::{Announcement, Announcer};
use crate::config::ClockConfig;
use crate::constants::DUE_REACHED_PHRASE;
use crate::dance::{DanceController, PulsePattern};
use crate::display::ClockFace;
use crate::error::{DanceError, SpeechError, TimeParseError};
use crate::input::{action_for_key, KeyAction};
use crate::ledger::{KeyValueStore, ReminderLedger};
use crate::speech::{Speaker, Utterance};
use crate::time::{format_due_label, minutes_until_due, DueTime, LocalClock, Moment};

/// Mutable application state. `minute_difference` is derived from
/// `due` and `current` and only changes through `refresh_difference`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockState {
    current: Moment,
    due: Moment,
    title: String,
    minute_difference: i64,
    dancing: bool,
    control_panel_visible: bool,
    due_error: Option<String>,
}

impl ClockState {
    fn new(current: Moment, due: Moment, title: String) -> Self {
        let mut state = Self {
            current,
            due,
            title,
            minute_difference: 0,
            dancing: false,
            control_panel_visible: false,
            due_error: None,
        };
        state.refresh_difference();
        state
    }

    fn refresh_difference(&mut self) {
        self.minute_difference = minutes_until_due(self.due.epoch_ms, self.current.epoch_ms);
    }

    pub fn current(&self) -> &Moment {
        &self.current
    }

    pub fn due(&self) -> &Moment {
        &self.due
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn minute_difference(&self) -> i64 {
        self.minute_difference
    }

    pub fn is_dancing(&self) -> bool {
        self.dancing
    }

    pub fn is_control_panel_visible(&self) -> bool {
        self.control_panel_visible
    }

    pub fn due_error(&self) -> Option<&str> {
        self.due_error.as_deref()
    }
}

/// Everything the page needs to render one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockView {
    pub title: String,
    pub face: ClockFace,
    pub due_label: String,
    pub countdown: String,
    pub warning_class: Option<String>,
    pub dancing: bool,
    pub control_panel_visible: bool,
    pub due_field: String,
    pub due_error: Option<String>,
}

/// `in N minutes`, or the due phrase once nothing is left.
pub fn countdown_phrase(minute_difference: i64) -> String {
    if minute_difference > 0 {
        format!("in {minute_difference} minutes")
    } else {
        DUE_REACHED_PHRASE.to_string()
    }
}

pub struct ClockApp<C, S, D, K> {
    config: ClockConfig,
    state: ClockState,
    ledger: ReminderLedger<K>,
    announcer: Announcer,
    clock: C,
    speaker: S,
    dance: D,
    disposed: bool,
}

impl<C, S, D, K> ClockApp<C, S, D, K>
where
    C: LocalClock,
    S: Speaker,
    D: DanceController,
    K: KeyValueStore,
{
    pub fn new(config: ClockConfig, clock: C, speaker: S, dance: D, store: K) -> Self {
        let now = clock.now();
        let due = config.due().resolve(&clock);
        let state = ClockState::new(now, due, config.title().to_string());
        log::info!(
            "[mount] {} due {} ({} minutes), reminders at {:?}",
            state.title,
            config.due(),
            state.minute_difference,
            config.thresholds().as_slice()
        );
        Self {
            config,
            state,
            ledger: ReminderLedger::new(store),
            announcer: Announcer::new(),
            clock,
            speaker,
            dance,
            disposed: false,
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn ledger(&self) -> &ReminderLedger<K> {
        &self.ledger
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn dance(&self) -> &D {
        &self.dance
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// One timer step: refresh the time and fire a due reminder.
    pub fn tick(&mut self) {
        if self.disposed {
            return;
        }
        self.state.current = self.clock.now();
        self.state.refresh_difference();
        let minutes = self.state.minute_difference;
        log::debug!("[tick] {minutes} minutes left");

        if !self.config.thresholds().contains(minutes)
            || self.ledger.is_announced(&self.state.title, minutes)
        {
            return;
        }
        // Mark before speaking so a later tick in the same minute stays quiet.
        if let Err(e) = self.ledger.mark_announced(&self.state.title, minutes) {
            log::warn!("[ledger] {e}");
        }
        log::info!("[tick] announcing {minutes} minutes for {}", self.state.title);
        let first = self
            .announcer
            .enqueue(Announcement::new(self.state.title.clone(), minutes));
        self.speak_chain(first);
    }

    /// The platform finished the current utterance.
    pub fn on_speech_end(&mut self) {
        if self.disposed {
            return;
        }
        let step = self.announcer.on_end();
        if let Some(done) = step.completed {
            log::info!("[speech] finished reminder for {} minutes", done.minutes);
            if done.minutes == self.config.thresholds().lead() && !self.state.dancing {
                self.set_dancing(true);
            }
        }
        self.speak_chain(step.speak);
    }

    /// The platform reported a failure for the current utterance.
    pub fn on_speech_error(&mut self, error: &SpeechError) {
        if self.disposed {
            return;
        }
        log::warn!("[speech] {error}");
        let step = self.announcer.abort_current();
        self.speak_chain(step.speak);
    }

    fn speak_chain(&mut self, mut next: Option<Utterance>) {
        while let Some(utterance) = next.take() {
            match self.speaker.speak(&utterance) {
                Ok(()) => break,
                Err(e) => {
                    log::warn!("[speech] {e}");
                    next = self.announcer.abort_current().speak;
                }
            }
        }
    }

    /// Clock face click.
    pub fn toggle_dance(&mut self) {
        let next = !self.state.dancing;
        self.set_dancing(next);
    }

    pub fn set_dancing(&mut self, on: bool) {
        if self.disposed {
            return;
        }
        if on {
            self.dance.register_pattern(PulsePattern::vanish());
            match self.dance.start() {
                Ok(()) => {
                    self.state.dancing = true;
                    log::info!("[dance] started");
                }
                Err(e) => {
                    self.state.dancing = false;
                    log::warn!("[dance] {e}");
                }
            }
        } else {
            self.dance.stop();
            self.state.dancing = false;
            log::info!("[dance] stopped");
        }
    }

    /// Playback failed after `start` had already succeeded, e.g. a blocked
    /// autoplay. Only a dance that is still on gets stopped.
    pub fn on_dance_failed(&mut self, error: &DanceError) {
        if self.disposed || !self.state.dancing {
            return;
        }
        log::warn!("[dance] {error}");
        self.dance.stop();
        self.state.dancing = false;
    }

    pub fn toggle_control_panel(&mut self) {
        self.state.control_panel_visible = !self.state.control_panel_visible;
    }

    /// Returns true when the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match action_for_key(key) {
            Some(KeyAction::ToggleControlPanel) => {
                self.toggle_control_panel();
                log::info!("[keys] control panel visible={}", self.state.control_panel_visible);
                true
            }
            None => false,
        }
    }

    /// Title edits take effect immediately and move reminders to the new title's keys.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.state.title = title.into();
    }

    /// Due edits from the settings form. Invalid text leaves the due time untouched.
    pub fn set_due_input(&mut self, input: &str) -> Result<(), TimeParseError> {
        match DueTime::parse(input) {
            Ok(due) => {
                self.state.due = due.resolve(&self.clock);
                self.state.due_error = None;
                self.state.refresh_difference();
                log::info!("[config] due set to {due}");
                Ok(())
            }
            Err(e) => {
                self.state.due_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn view(&self) -> ClockView {
        let s = &self.state;
        ClockView {
            title: s.title.clone(),
            face: ClockFace::from_moment(&s.current),
            due_label: format_due_label(&s.due),
            countdown: countdown_phrase(s.minute_difference),
            warning_class: self
                .config
                .warning_class(s.minute_difference)
                .map(str::to_string),
            dancing: s.dancing,
            control_panel_visible: s.control_panel_visible,
            due_field: DueTime::of(&s.due).to_string(),
            due_error: s.due_error.clone(),
        }
    }

    /// Tear down: silence speech, stop the dance, ignore late callbacks.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.announcer.cancel();
        self.speaker.cancel();
        if self.state.dancing {
            self.dance.stop();
            self.state.dancing = false;
        }
        self.disposed = true;
        log::info!("[mount] disposed");
    }
}
