use super::elements::{js_message, Lookup};
use super::{App, Listener};
use crate::a11y::{
    focus_wrap_target, section_label, tab_index, FOCUSABLE_SELECTOR, HEADING_SELECTOR,
    INTERACTIVE_SELECTOR, SKIP_LINK_CLASS, SKIP_LINK_HREF, SKIP_LINK_TEXT,
};
use crate::error::SetupError;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

const SECTIONS: &str = "section";

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    insert_skip_link(app.document())?;
    if app.config().sequential_tab_order {
        assign_tab_order(&app.lookup())?;
    }
    label_sections(&app.lookup())?;

    let document = app.document().clone();
    app.listen(Listener::new(app.document(), "keydown", move |event: Event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if key.key() != "Tab" {
            return;
        }
        if let Some(target) = wrap_focus(&document, key.shift_key()) {
            event.prevent_default();
            let _ = target.focus();
        }
    })?);

    Ok(())
}

fn insert_skip_link(document: &Document) -> Result<(), SetupError> {
    let body = document.body().ok_or(SetupError::missing("body"))?;
    let link = document
        .create_element("a")
        .map_err(|error| SetupError::js("createElement", js_message(&error)))?;
    link.set_attribute("href", SKIP_LINK_HREF)
        .map_err(|error| SetupError::js("setAttribute", js_message(&error)))?;
    link.set_text_content(Some(SKIP_LINK_TEXT));
    link.set_class_name(SKIP_LINK_CLASS);

    body.insert_before(&link, body.first_child().as_ref())
        .map_err(|error| SetupError::js("insertBefore", js_message(&error)))?;
    Ok(())
}

fn assign_tab_order(lookup: &Lookup<'_>) -> Result<(), SetupError> {
    let interactive: Vec<Element> = lookup.all(INTERACTIVE_SELECTOR)?;
    for (position, element) in interactive.iter().enumerate() {
        let _ = element.set_attribute("tabindex", &tab_index(position));
    }
    Ok(())
}

fn label_sections(lookup: &Lookup<'_>) -> Result<(), SetupError> {
    let sections: Vec<Element> = lookup.all(SECTIONS)?;
    for (index, section) in sections.iter().enumerate() {
        let has_label = section
            .get_attribute("aria-label")
            .is_some_and(|label| !label.is_empty());
        let heading = section.query_selector(HEADING_SELECTOR).ok().flatten();
        let heading_id = heading.as_ref().map(|heading| heading.id());
        let heading_id = heading_id.as_ref().map(|id| Some(id.as_str()));

        let Some(label) = section_label(index, has_label, heading_id) else {
            continue;
        };
        let _ = section.set_attribute("aria-labelledby", &label.labelled_by);
        if let (Some(heading), Some(id)) = (&heading, &label.assign_heading_id) {
            heading.set_id(id);
        }
    }
    Ok(())
}

/// Element to focus when Tab should wrap around the page.
fn wrap_focus(document: &Document, shift: bool) -> Option<HtmlElement> {
    let focusable: Vec<HtmlElement> = Lookup::new(document).all(FOCUSABLE_SELECTOR).ok()?;
    let active = document.active_element();
    let focused = active.as_ref().and_then(|active| {
        focusable
            .iter()
            .position(|candidate| AsRef::<Element>::as_ref(candidate) == active)
    });

    let target = focus_wrap_target(focusable.len(), focused, shift)?;
    focusable.into_iter().nth(target)
}
