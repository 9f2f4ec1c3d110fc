use crate::dom::{self, Listener};
use crate::view::ClockDom;
use crate::SharedApp;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &SharedApp, view: &ClockDom) {
    // Typing a title must not toggle the panel
    if dom::targets_text_input(ev) {
        return;
    }
    let handled = app.borrow_mut().handle_key(&ev.key());
    if handled {
        ev.prevent_default();
        view.apply(&app.borrow().view());
    }
}

pub fn wire_global_keydown(window: &web::Window, app: SharedApp, view: Rc<ClockDom>) -> Option<Listener> {
    dom::listen(window, "keydown", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() {
            handle_global_keydown(ev, &app, &view);
        }
    })
}
