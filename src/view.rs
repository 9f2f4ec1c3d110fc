//! DOM for the clock page: built once at mount, patched on every render.

use crate::constants::{
    DANCING_CLASS, DUE_INPUT_ID, DUE_PREFIX, DUE_SEPARATOR, HIDDEN_CLASS, PULSE_WRAPPER_CLASSES,
    TITLE_INPUT_ID,
};
use crate::dom::{append, create, set_text};
use clock_core::ClockView;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct ClockDom {
    document: web::Document,
    root: web::Element,
    title: web::Element,
    pub clock: web::Element,
    hour: web::Element,
    minute: web::Element,
    meridiem: web::Element,
    second: web::Element,
    due_label: web::Element,
    countdown: web::Element,
    form: web::Element,
    pub title_input: web::HtmlInputElement,
    pub due_input: web::HtmlInputElement,
    due_error: web::Element,
}

fn create_input(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlInputElement> {
    let input = create(document, "input", "")?
        .dyn_into::<web::HtmlInputElement>()
        .map_err(|e| anyhow::anyhow!("input element: {:?}", e))?;
    input.set_id(id);
    input.set_type("text");
    Ok(input)
}

fn create_label(document: &web::Document, for_id: &str, text: &str) -> anyhow::Result<web::Element> {
    let label = create(document, "label", "")?;
    _ = label.set_attribute("for", for_id);
    label.set_text_content(Some(text));
    Ok(label)
}

impl ClockDom {
    pub fn build(document: &web::Document, root: &web::Element) -> anyhow::Result<Self> {
        root.set_inner_html("");
        _ = root.class_list().add_1("app");

        let title = create(document, "h1", "")?;
        append(root, &title)?;

        // Clock face inside the pulse wrapper
        let wrapper = create(document, "div", PULSE_WRAPPER_CLASSES)?;
        let clock = create(document, "div", "clock")?;
        let hour = create(document, "span", "hour")?;
        let separator = create(document, "span", "separator")?;
        separator.set_text_content(Some(":"));
        let minute = create(document, "span", "minute")?;
        let meta = create(document, "div", "meta")?;
        let meridiem = create(document, "span", "ampm")?;
        let second = create(document, "span", "second")?;
        append(&meta, &meridiem)?;
        append(&meta, &second)?;
        append(&clock, &hour)?;
        append(&clock, &separator)?;
        append(&clock, &minute)?;
        append(&clock, &meta)?;
        append(&wrapper, &clock)?;
        append(root, &wrapper)?;

        // Due hint line
        let hint = create(document, "p", "hint")?;
        let prefix = document.create_text_node(DUE_PREFIX);
        let due_label = create(document, "span", "due-label")?;
        let separator = document.create_text_node(DUE_SEPARATOR);
        let countdown = create(document, "span", "")?;
        append(&hint, &prefix)?;
        append(&hint, &due_label)?;
        append(&hint, &separator)?;
        append(&hint, &countdown)?;
        append(root, &hint)?;

        // Settings form, hidden until toggled
        let form = create(document, "div", "control-form")?;
        _ = form.class_list().add_1(HIDDEN_CLASS);
        let title_input = create_input(document, TITLE_INPUT_ID)?;
        let due_input = create_input(document, DUE_INPUT_ID)?;
        let due_error = create(document, "span", "due-error")?;
        let title_label = create_label(document, TITLE_INPUT_ID, "Title: ")?;
        let due_input_label = create_label(document, DUE_INPUT_ID, "Due: ")?;
        append(&form, &title_label)?;
        append(&form, &title_input)?;
        append(&form, &due_input_label)?;
        append(&form, &due_input)?;
        append(&form, &due_error)?;
        append(root, &form)?;

        Ok(Self {
            document: document.clone(),
            root: root.clone(),
            title,
            clock,
            hour,
            minute,
            meridiem,
            second,
            due_label,
            countdown,
            form,
            title_input,
            due_input,
            due_error,
        })
    }

    pub fn apply(&self, view: &ClockView) {
        set_text(&self.title, &view.title);
        set_text(&self.hour, &view.face.hour);
        set_text(&self.minute, &view.face.minute);
        set_text(&self.meridiem, view.face.meridiem);
        set_text(&self.second, &view.face.second);
        set_text(&self.due_label, &view.due_label);
        set_text(&self.countdown, &format!(" {}", view.countdown));
        self.countdown
            .set_class_name(view.warning_class.as_deref().unwrap_or(""));

        _ = self
            .form
            .class_list()
            .toggle_with_force(HIDDEN_CLASS, !view.control_panel_visible);
        _ = self
            .root
            .class_list()
            .toggle_with_force(DANCING_CLASS, view.dancing);

        // Leave fields alone while the user is typing in them
        self.sync_input(&self.title_input, &view.title);
        self.sync_input(&self.due_input, &view.due_field);
        set_text(&self.due_error, view.due_error.as_deref().unwrap_or(""));
    }

    fn sync_input(&self, input: &web::HtmlInputElement, value: &str) {
        let input_el: &web::Element = input.as_ref();
        let focused = self.document.active_element().as_ref() == Some(input_el);
        if !focused && input.value() != value {
            input.set_value(value);
        }
    }

    pub fn clear(&self) {
        self.root.set_inner_html("");
        _ = self.root.class_list().remove_1(DANCING_CLASS);
    }
}
