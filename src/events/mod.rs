pub mod form;
pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;

use crate::dom::Listener;
use crate::view::ClockDom;
use crate::SharedApp;
use std::rc::Rc;

#[derive(Clone)]
pub struct InputWiring {
    pub app: SharedApp,
    pub view: Rc<ClockDom>,
}

/// Clock face click plus the settings form fields.
pub fn wire_input_handlers(w: &InputWiring) -> Vec<Listener> {
    [
        pointer::wire_clock_click(w),
        form::wire_title_input(w),
        form::wire_due_input(w),
    ]
    .into_iter()
    .flatten()
    .collect()
}
