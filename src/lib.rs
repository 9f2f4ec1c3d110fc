#![cfg(target_arch = "wasm32")]
use clock_core::ClockApp;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod clock;
mod config;
mod constants;
mod dom;
mod events;
mod speech;
mod storage;
mod view;

use audio::{DanceEvent, DanceSink, WebDance};
use clock::BrowserClock;
use constants::{MOUNT_ELEMENT_ID, TICK_INTERVAL_MS};
use speech::{SpeechEvent, SpeechSink, WebSpeaker};
use storage::SessionStore;
use view::ClockDom;

pub(crate) type WebClockApp = ClockApp<BrowserClock, WebSpeaker, WebDance, SessionStore>;
pub(crate) type SharedApp = Rc<RefCell<WebClockApp>>;

/// A mounted clock. Dropping it tears everything down: the app is disposed,
/// then the timer, listeners and DOM are released.
struct Mounted {
    app: SharedApp,
    view: Rc<ClockDom>,
    _interval: dom::Interval,
    _listeners: Vec<dom::Listener>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        match self.app.try_borrow_mut() {
            Ok(mut app) => app.dispose(),
            Err(_) => log::warn!("[mount] app busy during unmount"),
        }
        self.view.clear();
        log::info!("[mount] unmounted");
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

fn render(app: &SharedApp, view: &ClockDom) {
    view.apply(&app.borrow().view());
}

// Speech callbacks run on a fresh task so the utterance closures have returned
// before the app queues the next utterance.
fn wire_speech_sink(sink: &SpeechSink, app: &SharedApp, view: &Rc<ClockDom>) {
    let weak_app = Rc::downgrade(app);
    let view = view.clone();
    *sink.borrow_mut() = Some(Box::new(move |event: SpeechEvent| {
        let weak_app = weak_app.clone();
        let view = view.clone();
        spawn_local(async move {
            let Some(app) = weak_app.upgrade() else {
                return;
            };
            match event {
                SpeechEvent::End => app.borrow_mut().on_speech_end(),
                SpeechEvent::Error(e) => app.borrow_mut().on_speech_error(&e),
            }
            render(&app, &view);
        });
    }));
}

// A rejected play() turns the dance back off and redraws without the dancing class.
fn wire_dance_sink(sink: &DanceSink, app: &SharedApp, view: &Rc<ClockDom>) {
    let weak_app = Rc::downgrade(app);
    let view = view.clone();
    *sink.borrow_mut() = Some(Box::new(move |event: DanceEvent| {
        let weak_app = weak_app.clone();
        let view = view.clone();
        spawn_local(async move {
            let Some(app) = weak_app.upgrade() else {
                return;
            };
            match event {
                DanceEvent::Failed(e) => app.borrow_mut().on_dance_failed(&e),
            }
            render(&app, &view);
        });
    }));
}

fn mount(element_id: &str) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root = document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", element_id))?;

    // Replace any previous mount first so its timer and listeners are gone
    unmount();

    let config = config::read_config(&root)?;
    let view = Rc::new(ClockDom::build(&document, &root)?);

    let sink: SpeechSink = Rc::new(RefCell::new(None));
    let dance_sink: DanceSink = Rc::new(RefCell::new(None));
    let speaker = WebSpeaker::new(&window, config.voice().clone(), sink.clone());
    let dance = WebDance::new(config.audio_src(), dance_sink.clone());
    let store = SessionStore::from_window(&window);
    let app: SharedApp = Rc::new(RefCell::new(ClockApp::new(
        config,
        BrowserClock,
        speaker,
        dance,
        store,
    )));
    wire_speech_sink(&sink, &app, &view);
    wire_dance_sink(&dance_sink, &app, &view);

    let tick_app = app.clone();
    let tick_view = view.clone();
    let interval = dom::every(&window, TICK_INTERVAL_MS, move || {
        tick_app.borrow_mut().tick();
        render(&tick_app, &tick_view);
    })?;

    let mut listeners = Vec::new();
    listeners.extend(events::wire_global_keydown(&window, app.clone(), view.clone()));
    listeners.extend(events::wire_input_handlers(&events::InputWiring {
        app: app.clone(),
        view: view.clone(),
    }));

    render(&app, &view);
    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(Mounted {
            app,
            view,
            _interval: interval,
            _listeners: listeners,
        });
    });
    log::info!("[mount] clock mounted on #{}", element_id);
    Ok(())
}

fn unmount() {
    let previous = MOUNTED.with(|m| m.borrow_mut().take());
    drop(previous);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("dancing-clock starting");

    let has_mount = web::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ELEMENT_ID))
        .is_some();
    if has_mount {
        if let Err(e) = mount(MOUNT_ELEMENT_ID) {
            log::error!("init error: {:?}", e);
        }
    }
    Ok(())
}

/// Mount the clock into the element with the given id, replacing any earlier mount.
#[wasm_bindgen(js_name = mountClock)]
pub fn mount_clock(element_id: &str) -> Result<(), JsValue> {
    mount(element_id).map_err(|e| {
        log::error!("[mount] {:?}", e);
        JsValue::from_str(&e.to_string())
    })
}

/// Stop the timer, silence speech and music, and remove the clock.
#[wasm_bindgen(js_name = unmountClock)]
pub fn unmount_clock() {
    unmount();
}
