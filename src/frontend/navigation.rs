use super::elements::Lookup;
use super::menu::close_menu;
use super::schedule::{run_frames, PendingTimeout};
use super::{App, Listener};
use crate::error::SetupError;
use crate::navigation::{
    active_link_flags, active_section, anchor_scroll_target, is_activation_key, is_scrolled, LinkTarget,
    ScrollAnimation, SectionBounds,
};
use crate::timing::throttled;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window};

const NAVBAR: &str = "#navbar";
const NAV_LINKS: &str = ".nav-link";
const MENU_LINKS: &str = ".nav-menu .nav-link";
const SECTIONS: &str = "section[id]";
const SCROLLED_CLASS: &str = "scrolled";
const ACTIVE_CLASS: &str = "active";
const GUARD_TIMER: &str = "external-links";

fn section_bounds(document: &Document) -> Vec<SectionBounds> {
    Lookup::new(document)
        .all::<HtmlElement>(SECTIONS)
        .unwrap_or_default()
        .into_iter()
        .map(|section| SectionBounds {
            id: section.id(),
            top: f64::from(section.offset_top()),
            height: f64::from(section.offset_height()),
        })
        .collect()
}

fn highlight(links: &[HtmlElement], section_id: &str) {
    let hrefs: Vec<String> = links
        .iter()
        .map(|link| link.get_attribute("href").unwrap_or_default())
        .collect();

    for (link, active) in links.iter().zip(active_link_flags(&hrefs, section_id)) {
        let _ = link.class_list().toggle_with_force(ACTIVE_CLASS, active);
    }
}

fn supports_smooth_scroll(document: &Document) -> bool {
    document
        .document_element()
        .and_then(|root| root.dyn_into::<HtmlElement>().ok())
        .and_then(|root| js_sys::Reflect::has(&root.style(), &JsValue::from_str("scrollBehavior")).ok())
        .unwrap_or(false)
}

fn scroll_to(window: &Window, document: &Document, top: f64, fallback_ms: u32) {
    if supports_smooth_scroll(document) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
        return;
    }

    let animation = ScrollAnimation::new(window.scroll_y().unwrap_or(0.0), top, fallback_ms);
    let window = window.clone();
    run_frames(move |elapsed| {
        window.scroll_to_with_x_and_y(0.0, animation.position_at(elapsed));
        !animation.is_done(elapsed)
    });
}

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    let lookup = app.lookup();
    let navbar: HtmlElement = lookup.one(NAVBAR)?;
    let links: Rc<Vec<HtmlElement>> = Rc::new(lookup.non_empty(NAV_LINKS)?);
    let config = Rc::clone(app.config());

    let window = app.window().clone();
    let document = app.document().clone();
    let scroll_links = Rc::clone(&links);
    let scroll_config = Rc::clone(&config);
    let on_scroll = throttled(config.scroll_throttle_ms, move |_: Event| {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let scrolled = is_scrolled(scroll_y, scroll_config.scrolled_threshold_px);
        let _ = navbar.class_list().toggle_with_force(SCROLLED_CLASS, scrolled);

        let sections = section_bounds(&document);
        if let Some(id) = active_section(&sections, scroll_y, scroll_config.active_probe_offset_px) {
            highlight(&scroll_links, id);
        }
    });
    app.listen(Listener::passive(app.window(), "scroll", on_scroll)?);

    for link in links.iter() {
        if let Some(LinkTarget::InPage(hash)) = link.get_attribute("href").as_deref().and_then(LinkTarget::parse) {
            let window = app.window().clone();
            let document = app.document().clone();
            let click_links = Rc::clone(&links);
            let click_config = Rc::clone(&config);
            app.listen(Listener::new(link, "click", move |event: Event| {
                event.prevent_default();
                let Some(section) = document
                    .query_selector(&hash)
                    .ok()
                    .flatten()
                    .and_then(|target| target.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };

                let top = anchor_scroll_target(f64::from(section.offset_top()), click_config.anchor_offset_px);
                scroll_to(&window, &document, top, click_config.scroll_fallback_ms);
                highlight(&click_links, hash.trim_start_matches('#'));
                close_menu(&document);
            })?);
        }

        let activated = link.clone();
        app.listen(Listener::new(link, "keydown", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if is_activation_key(&key) {
                event.prevent_default();
                activated.click();
            }
        })?);
    }

    Ok(())
}

/// Forces full-page navigation for menu links that leave the page, in case
/// another script swallows their clicks. Installed after a short delay.
pub fn setup_external_link_guard(app: &mut App) -> Result<(), SetupError> {
    let document = app.document().clone();
    let window = app.window().clone();
    let listeners = app.listeners();

    app.track_timer(
        GUARD_TIMER,
        PendingTimeout::new(app.config().external_link_guard_delay_ms, move || {
            let links: Vec<HtmlElement> = Lookup::new(&document).all(MENU_LINKS).unwrap_or_default();
            for link in links {
                let Some(LinkTarget::Page(href)) = link.get_attribute("href").as_deref().and_then(LinkTarget::parse) else {
                    continue;
                };
                let window = window.clone();
                let guard = Listener::new(&link, "click", move |event: Event| {
                    event.stop_propagation();
                    event.prevent_default();
                    let _ = window.location().set_href(&href);
                });
                if let Ok(guard) = guard {
                    listeners.borrow_mut().push(guard);
                }
            }
        }),
    );

    Ok(())
}
