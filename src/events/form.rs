use super::InputWiring;
use crate::dom::{self, Listener};
use wasm_bindgen::JsCast;
use web_sys as web;

fn input_value(ev: &web::Event) -> Option<String> {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .map(|input| input.value())
}

pub fn wire_title_input(w: &InputWiring) -> Option<Listener> {
    let w2 = w.clone();
    dom::listen(&w.view.title_input, "input", move |ev: web::Event| {
        if let Some(title) = input_value(&ev) {
            w2.app.borrow_mut().set_title(title);
            w2.view.apply(&w2.app.borrow().view());
        }
    })
}

pub fn wire_due_input(w: &InputWiring) -> Option<Listener> {
    let w2 = w.clone();
    dom::listen(&w.view.due_input, "input", move |ev: web::Event| {
        if let Some(text) = input_value(&ev) {
            // Invalid text is reported in the view and leaves the due time as it was
            if let Err(e) = w2.app.borrow_mut().set_due_input(&text) {
                log::debug!("[config] {e}");
            }
            w2.view.apply(&w2.app.borrow().view());
        }
    })
}
