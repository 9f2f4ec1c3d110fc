use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub fn listen(
    target: &web::EventTarget,
    event: &'static str,
    handler: impl FnMut(web::Event) + 'static,
) -> Option<Listener> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        Ok(()) => Some(Listener {
            target: target.clone(),
            event,
            closure,
        }),
        Err(e) => {
            log::error!("{} listener error: {:?}", event, e);
            None
        }
    }
}

/// A `setInterval` timer that is cleared when dropped.
pub struct Interval {
    window: web::Window,
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
    }
}

pub fn every(
    window: &web::Window,
    period_ms: i32,
    handler: impl FnMut() + 'static,
) -> anyhow::Result<Interval> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    let handle = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        )
        .map_err(|e| anyhow::anyhow!("setInterval failed: {:?}", e))?;
    Ok(Interval {
        window: window.clone(),
        handle,
        _closure: closure,
    })
}

pub fn create(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<web::Element> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append_child: {:?}", e))
}

#[inline]
pub fn set_text(el: &web::Element, text: &str) {
    if el.text_content().as_deref() != Some(text) {
        el.set_text_content(Some(text));
    }
}

/// True when keystrokes on this event's target are text entry.
pub fn targets_text_input(ev: &web::Event) -> bool {
    ev.target()
        .map(|t| t.dyn_ref::<web::HtmlInputElement>().is_some())
        .unwrap_or(false)
}
