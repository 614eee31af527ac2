use super::elements::{clear_style, set_style, Lookup};
use super::schedule::PendingTimeout;
use super::{App, Listener, TimerRegistry};
use crate::error::SetupError;
use crate::telemetry::{log_event, LogLevel};
use crate::theme::{PreferenceStore, Theme, ThemeController, THEME_KEY};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, Event, HtmlElement, MediaQueryListEvent, Storage};

const TOGGLE: &str = "#theme-toggle";
const ICON: &str = "#theme-toggle i";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
const BODY_TRANSITION: &str = "background-color 0.3s ease, color 0.3s ease";
const TRANSITION_TIMER: &str = "theme-transition";

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

/// `localStorage`-backed preference. Storage failures behave like an empty
/// store.
struct LocalStore;

impl PreferenceStore for LocalStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(THEME_KEY).ok().flatten()
    }

    fn save(&mut self, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(THEME_KEY, value);
        }
    }
}

struct ThemeView {
    toggle: HtmlElement,
    icon: Option<Element>,
    root: Element,
    body: Option<HtmlElement>,
    timers: TimerRegistry,
    transition_ms: u32,
}

impl ThemeView {
    fn apply(&self, theme: Theme) {
        let _ = self.root.set_attribute("data-theme", theme.as_str());
        if let Some(icon) = &self.icon {
            icon.set_class_name(theme.icon_class());
        }
        let _ = self.toggle.set_attribute("aria-label", &theme.toggle_label());

        let Some(body) = self.body.clone() else {
            return;
        };
        set_style(&body, "transition", BODY_TRANSITION);
        // A newer toggle replaces, and so cancels, the pending reset.
        self.timers.borrow_mut().insert(
            TRANSITION_TIMER,
            Box::new(PendingTimeout::new(self.transition_ms, move || {
                clear_style(&body, "transition");
            })),
        );
    }
}

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    let lookup = app.lookup();
    let toggle: HtmlElement = lookup.one(TOGGLE)?;
    let icon: Option<Element> = lookup.optional(ICON)?;
    let root = app
        .document()
        .document_element()
        .ok_or(SetupError::missing("html"))?;

    let view = Rc::new(ThemeView {
        toggle,
        icon,
        root,
        body: app.document().body(),
        timers: app.timers(),
        transition_ms: app.config().theme_transition_ms,
    });

    let media = app.window().match_media(DARK_QUERY).ok().flatten();
    let prefers_dark = media.as_ref().is_some_and(|query| query.matches());
    let controller = Rc::new(RefCell::new(ThemeController::resolve(LocalStore, prefers_dark)));
    view.apply(controller.borrow().current());

    let min_level = app.config().log_level;

    let on_toggle_view = Rc::clone(&view);
    let on_toggle_controller = Rc::clone(&controller);
    app.listen(Listener::new(&view.toggle, "click", move |_| {
        let theme = on_toggle_controller.borrow_mut().toggle();
        on_toggle_view.apply(theme);
        log_event(
            min_level,
            LogLevel::Info,
            "theme.changed",
            json!({ "theme": theme.as_str(), "source": "toggle" }),
        );
    })?);

    if let Some(media) = media {
        let on_system_view = Rc::clone(&view);
        app.listen(Listener::new(&media, "change", move |event: Event| {
            let Some(event) = event.dyn_ref::<MediaQueryListEvent>() else {
                return;
            };
            let changed = controller.borrow_mut().system_changed(event.matches());
            if let Some(theme) = changed {
                on_system_view.apply(theme);
                log_event(
                    min_level,
                    LogLevel::Info,
                    "theme.changed",
                    json!({ "theme": theme.as_str(), "source": "system" }),
                );
            }
        })?);
    }

    Ok(())
}
