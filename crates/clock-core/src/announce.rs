//! Two-utterance reminder announcements as an explicit state machine.
//!
//! `Idle → Speaking1 → Speaking2 → Idle`. Announcements arriving while one
//! is in flight wait in a queue and start when the current one finishes or
//! fails.

use crate::speech::Utterance;
use std::collections::VecDeque;

/// A reminder to be spoken. The title is captured when the reminder fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub title: String,
    pub minutes: i64,
}

impl Announcement {
    pub fn new(title: impl Into<String>, minutes: i64) -> Self {
        Self {
            title: title.into(),
            minutes,
        }
    }

    pub fn first_message(&self) -> String {
        format!(
            "You have {} minutes left until the {} is due.",
            self.minutes, self.title
        )
    }

    pub fn repeat_message(&self) -> String {
        format!("Again. {}", self.first_message())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AnnouncePhase {
    #[default]
    Idle,
    Speaking1(Announcement),
    Speaking2(Announcement),
}

/// Result of advancing the machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Advance {
    /// Set when both utterances of an announcement finished.
    pub completed: Option<Announcement>,
    /// Next utterance to hand to the speaker.
    pub speak: Option<Utterance>,
}

#[derive(Debug, Default)]
pub struct Announcer {
    phase: AnnouncePhase,
    queue: VecDeque<Announcement>,
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &AnnouncePhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == AnnouncePhase::Idle
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue an announcement. Returns the utterance to speak if the machine was idle.
    pub fn enqueue(&mut self, announcement: Announcement) -> Option<Utterance> {
        self.queue.push_back(announcement);
        if self.is_idle() {
            self.start_next()
        } else {
            None
        }
    }

    /// The current utterance finished speaking.
    pub fn on_end(&mut self) -> Advance {
        match std::mem::take(&mut self.phase) {
            AnnouncePhase::Idle => Advance::default(),
            AnnouncePhase::Speaking1(a) => {
                let speak = Utterance::new(a.repeat_message());
                self.phase = AnnouncePhase::Speaking2(a);
                Advance {
                    completed: None,
                    speak: Some(speak),
                }
            }
            AnnouncePhase::Speaking2(a) => Advance {
                completed: Some(a),
                speak: self.start_next(),
            },
        }
    }

    /// The current utterance failed; drop its announcement and move on.
    pub fn abort_current(&mut self) -> Advance {
        if let AnnouncePhase::Speaking1(a) | AnnouncePhase::Speaking2(a) =
            std::mem::take(&mut self.phase)
        {
            log::warn!("[speech] dropped announcement for {} minutes", a.minutes);
        }
        Advance {
            completed: None,
            speak: self.start_next(),
        }
    }

    pub fn cancel(&mut self) {
        self.phase = AnnouncePhase::Idle;
        self.queue.clear();
    }

    fn start_next(&mut self) -> Option<Utterance> {
        let next = self.queue.pop_front()?;
        let speak = Utterance::new(next.first_message());
        self.phase = AnnouncePhase::Speaking1(next);
        Some(speak)
    }
}
