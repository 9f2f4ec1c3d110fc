// Host-side integration tests for the clock application flow.

mod common;

use clock_core::{
    AnnouncePhase, ClockApp, ClockConfig, DanceError, DueTime, MemoryStore, SpeechError,
    Thresholds, TimeParseError,
};
use common::*;

type TestApp = ClockApp<ManualClock, RecordingSpeaker, RecordingDance, MemoryStore>;

fn make_app(hour: i64, minute: i64, second: i64) -> TestApp {
    ClockApp::new(
        ClockConfig::default(),
        ManualClock::at(hour, minute, second),
        RecordingSpeaker::default(),
        RecordingDance::default(),
        MemoryStore::new(),
    )
}

#[test]
fn initial_state_uses_config_due_pinned_to_59_seconds() {
    let app = make_app(21, 0, 59);
    let due = app.state().due();
    assert_eq!((due.hour, due.minute, due.second), (21, 30, 59));
    assert_eq!(due.epoch_ms, at(21, 30, 59));
    assert_eq!(app.state().minute_difference(), 30);
    assert_eq!(app.state().title(), "Lab 2");
    assert!(!app.state().is_dancing());
    assert!(!app.state().is_control_panel_visible());
}

#[test]
fn thirty_minutes_out_announces_once() {
    let mut app = make_app(21, 0, 30);
    app.tick();
    assert_eq!(app.state().minute_difference(), 30);
    assert_eq!(
        app.speaker().texts(),
        vec!["You have 30 minutes left until the Lab 2 is due."]
    );
    assert!(app.ledger().is_announced("Lab 2", 30));

    // Next second, still the same minute: nothing new is spoken
    app.clock().advance_secs(1);
    app.tick();
    assert_eq!(app.state().minute_difference(), 30);
    assert_eq!(app.speaker().spoken.len(), 1);
}

#[test]
fn lead_threshold_announcement_starts_dance_after_second_utterance() {
    let mut app = make_app(21, 0, 30);
    app.tick();
    app.on_speech_end();
    assert_eq!(
        app.speaker().texts()[1],
        "Again. You have 30 minutes left until the Lab 2 is due."
    );
    assert!(!app.state().is_dancing());

    app.on_speech_end();
    assert!(app.state().is_dancing());
    assert_eq!(app.dance().starts, 1);
    assert_eq!(app.dance().patterns.len(), 1);
    assert_eq!(app.dance().patterns[0].id, "vanish");
    assert!(app.announcer().is_idle());
}

#[test]
fn later_thresholds_do_not_dance() {
    let mut app = make_app(21, 25, 30);
    app.tick();
    assert_eq!(app.state().minute_difference(), 5);
    app.on_speech_end();
    app.on_speech_end();
    assert_eq!(app.speaker().spoken.len(), 2);
    assert!(!app.state().is_dancing());
    assert_eq!(app.dance().starts, 0);
}

#[test]
fn dance_already_running_is_left_alone() {
    let mut app = make_app(21, 0, 30);
    app.toggle_dance();
    assert_eq!(app.dance().starts, 1);
    app.tick();
    app.on_speech_end();
    app.on_speech_end();
    assert!(app.state().is_dancing());
    assert_eq!(app.dance().starts, 1);
}

#[test]
fn minutes_between_thresholds_stay_quiet() {
    let mut app = make_app(21, 10, 0);
    app.tick();
    assert_eq!(app.state().minute_difference(), 20);
    assert!(app.speaker().spoken.is_empty());
}

#[test]
fn new_title_gets_its_own_reminders() {
    let mut app = make_app(21, 0, 30);
    app.tick();
    assert!(app.ledger().is_announced("Lab 2", 30));

    app.set_title("Lab 3");
    assert!(!app.ledger().is_announced("Lab 3", 30));
    app.clock().advance_secs(1);
    app.tick();
    assert!(app.ledger().is_announced("Lab 3", 30));
    // The second announcement waits for the first chain to finish
    assert_eq!(app.speaker().spoken.len(), 1);
    assert_eq!(app.announcer().pending(), 1);

    app.on_speech_end();
    app.on_speech_end();
    assert_eq!(
        app.speaker().texts()[2],
        "You have 30 minutes left until the Lab 3 is due."
    );
}

#[test]
fn overlapping_reminders_are_spoken_in_order() {
    let mut app = ClockApp::new(
        ClockConfig::new(
            "Quiz",
            DueTime::new(10, 0).unwrap(),
            Thresholds::new(&[2, 1]).unwrap(),
            vec!["warn".to_string(), "error".to_string()],
        )
        .unwrap(),
        ManualClock::at(9, 58, 0),
        RecordingSpeaker::default(),
        RecordingDance::default(),
        MemoryStore::new(),
    );
    app.tick();
    assert_eq!(app.state().minute_difference(), 2);
    app.clock().set(9, 59, 0);
    app.tick();
    assert_eq!(app.state().minute_difference(), 1);
    assert_eq!(app.speaker().spoken.len(), 1);

    app.on_speech_end();
    app.on_speech_end();
    assert!(app.state().is_dancing());
    assert_eq!(
        app.speaker().texts()[2],
        "You have 1 minutes left until the Quiz is due."
    );
    assert!(matches!(app.announcer().phase(), AnnouncePhase::Speaking1(_)));
}

#[test]
fn missing_speech_still_marks_and_skips_dance() {
    let mut app = ClockApp::new(
        ClockConfig::default(),
        ManualClock::at(21, 0, 30),
        RecordingSpeaker::unavailable(),
        RecordingDance::default(),
        MemoryStore::new(),
    );
    app.tick();
    assert!(app.ledger().is_announced("Lab 2", 30));
    assert!(app.announcer().is_idle());
    app.clock().advance_secs(1);
    app.tick();
    assert!(app.speaker().spoken.is_empty());
    assert!(!app.state().is_dancing());
}

#[test]
fn speech_error_midway_aborts_the_chain() {
    let mut app = make_app(21, 0, 30);
    app.tick();
    app.on_speech_error(&SpeechError::Failed {
        reason: "interrupted".to_string(),
    });
    assert!(app.announcer().is_idle());
    app.on_speech_end();
    assert!(!app.state().is_dancing());
    assert_eq!(app.speaker().spoken.len(), 1);
}

#[test]
fn broken_audio_leaves_dance_off() {
    let mut app = ClockApp::new(
        ClockConfig::default(),
        ManualClock::at(21, 0, 30),
        RecordingSpeaker::default(),
        RecordingDance::broken(),
        MemoryStore::new(),
    );
    app.toggle_dance();
    assert!(!app.state().is_dancing());
    app.tick();
    app.on_speech_end();
    app.on_speech_end();
    assert!(!app.state().is_dancing());
    // The timer keeps going
    app.clock().advance_secs(60);
    app.tick();
    assert_eq!(app.state().minute_difference(), 29);
}

#[test]
fn blocked_autoplay_after_reminder_turns_dance_off() {
    let mut app = make_app(21, 0, 30);
    app.tick();
    app.on_speech_end();
    app.on_speech_end();
    // start() returned Ok; the rejection arrives later
    assert!(app.state().is_dancing());
    assert_eq!(app.dance().starts, 1);

    app.on_dance_failed(&DanceError::PlaybackFailed {
        reason: "NotAllowedError".to_string(),
    });
    assert!(!app.state().is_dancing());
    assert!(!app.view().dancing);
    assert_eq!(app.dance().stops, 1);

    // A second report for the same start is ignored
    app.on_dance_failed(&DanceError::PlaybackFailed {
        reason: "NotAllowedError".to_string(),
    });
    assert_eq!(app.dance().stops, 1);

    // The next click starts a fresh dance instead of stopping a silent one
    app.toggle_dance();
    assert!(app.state().is_dancing());
    assert_eq!(app.dance().starts, 2);
}

#[test]
fn late_playback_failure_after_stop_is_ignored() {
    let mut app = make_app(12, 0, 0);
    app.toggle_dance();
    app.toggle_dance();
    assert_eq!(app.dance().stops, 1);
    app.on_dance_failed(&DanceError::PlaybackFailed {
        reason: "aborted".to_string(),
    });
    assert!(!app.state().is_dancing());
    assert_eq!(app.dance().stops, 1);
}

#[test]
fn clicking_toggles_dance() {
    let mut app = make_app(12, 0, 0);
    app.toggle_dance();
    assert!(app.state().is_dancing());
    app.toggle_dance();
    assert!(!app.state().is_dancing());
    assert_eq!(app.dance().starts, 1);
    assert_eq!(app.dance().stops, 1);
}

#[test]
fn h_key_toggles_control_panel() {
    let mut app = make_app(12, 0, 0);
    assert!(app.handle_key("h"));
    assert!(app.state().is_control_panel_visible());
    assert!(app.view().control_panel_visible);
    assert!(app.handle_key("H"));
    assert!(!app.state().is_control_panel_visible());
    assert!(!app.handle_key("x"));
    assert!(!app.state().is_control_panel_visible());
}

#[test]
fn due_edit_recomputes_difference() {
    let mut app = make_app(21, 0, 30);
    app.set_due_input("21:45").unwrap();
    assert_eq!(app.state().due().epoch_ms, at(21, 45, 59));
    assert_eq!(app.state().minute_difference(), 45);
    assert_eq!(app.view().due_field, "21:45");
    assert!(app.state().due_error().is_none());
}

#[test]
fn invalid_due_edit_keeps_due_time() {
    let mut app = make_app(21, 0, 30);
    let before = *app.state().due();
    assert_eq!(
        app.set_due_input("nine"),
        Err(TimeParseError::InvalidTimeFormat {
            input: "nine".to_string()
        })
    );
    assert_eq!(*app.state().due(), before);
    assert_eq!(app.state().minute_difference(), 30);
    assert!(app.view().due_error.is_some());

    app.set_due_input("21:30").unwrap();
    assert!(app.view().due_error.is_none());
}

#[test]
fn view_reflects_severity_and_countdown() {
    let mut app = make_app(21, 25, 30);
    app.tick();
    let view = app.view();
    assert_eq!(view.title, "Lab 2");
    assert_eq!(view.face.hour, "09");
    assert_eq!(view.face.minute, "25");
    assert_eq!(view.face.second, "30");
    assert_eq!(view.face.meridiem, "PM");
    assert_eq!(view.due_label, "9:30:59 PM");
    assert_eq!(view.countdown, "in 5 minutes");
    assert_eq!(view.warning_class.as_deref(), Some("error"));

    app.clock().set(21, 10, 0);
    app.tick();
    assert_eq!(app.view().warning_class.as_deref(), Some("warn"));

    app.clock().set(20, 0, 0);
    app.tick();
    assert_eq!(app.view().warning_class, None);
    assert_eq!(app.view().countdown, "in 90 minutes");
}

#[test]
fn due_minute_beeps_then_wraps_to_tomorrow() {
    let mut app = make_app(21, 30, 10);
    app.tick();
    assert_eq!(app.state().minute_difference(), 0);
    assert_eq!(app.view().countdown, "Beep beep!");

    app.clock().set(21, 31, 0);
    app.tick();
    assert_eq!(app.state().minute_difference(), 1_439);
    assert_eq!(app.view().countdown, "in 1439 minutes");
}

#[test]
fn dispose_ignores_late_speech_and_stops_dance() {
    let mut app = make_app(21, 0, 30);
    app.toggle_dance();
    app.tick();
    app.dispose();
    assert!(app.is_disposed());
    assert_eq!(app.speaker().cancels, 1);
    assert_eq!(app.dance().stops, 1);
    assert!(!app.state().is_dancing());

    app.on_speech_end();
    app.on_speech_end();
    assert!(!app.state().is_dancing());
    assert_eq!(app.dance().starts, 1);
    assert_eq!(app.speaker().spoken.len(), 1);

    app.clock().advance_secs(600);
    app.tick();
    assert_eq!(app.state().minute_difference(), 30);
}

#[test]
fn session_store_survives_remount() {
    let store = SharedStore::default();
    let mut first = ClockApp::new(
        ClockConfig::default(),
        ManualClock::at(21, 0, 30),
        RecordingSpeaker::default(),
        RecordingDance::default(),
        store.clone(),
    );
    first.tick();
    first.dispose();

    let mut second = ClockApp::new(
        ClockConfig::default(),
        ManualClock::at(21, 0, 40),
        RecordingSpeaker::default(),
        RecordingDance::default(),
        store.clone(),
    );
    second.tick();
    assert!(second.speaker().spoken.is_empty());

    // A fresh session announces again
    let mut fresh = make_app(21, 0, 40);
    fresh.tick();
    assert_eq!(fresh.speaker().spoken.len(), 1);
}
