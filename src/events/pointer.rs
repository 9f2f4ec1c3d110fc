use super::InputWiring;
use crate::dom::{self, Listener};
use web_sys as web;

/// Clicking the clock face starts or stops the dance.
pub fn wire_clock_click(w: &InputWiring) -> Option<Listener> {
    let w2 = w.clone();
    dom::listen(&w.view.clock, "click", move |_ev: web::Event| {
        w2.app.borrow_mut().toggle_dance();
        log::info!("[click] dancing={}", w2.app.borrow().state().is_dancing());
        w2.view.apply(&w2.app.borrow().view());
    })
}
