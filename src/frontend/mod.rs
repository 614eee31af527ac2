//! Browser bindings for the portfolio page. Only built for `wasm32`.

mod a11y;
mod contact;
mod effects;
mod elements;
mod listener;
mod loading;
mod menu;
mod navigation;
mod observer;
mod particles;
mod reveal;
mod schedule;
mod theme;
mod typing;

pub use elements::Lookup;
pub use listener::Listener;
pub use observer::Observer;

use crate::config::{AppConfig, CONFIG_ELEMENT_ID};
use crate::error::SetupError;
use crate::loading::LoadState;
use crate::registry::{Registry, Release};
use crate::setup::{run_features, summarize, FeatureInit, FeatureOutcome, FeatureReport};
use crate::telemetry::{self, LogLevel};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{window, Document, Window};

pub type TimerRegistry = Rc<RefCell<Registry<Box<dyn Release>>>>;
pub type ObserverRegistry = Rc<RefCell<Registry<Observer>>>;
pub type ListenerSet = Rc<RefCell<Vec<Listener>>>;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Application state handed to every feature initializer.
pub struct App {
    config: Rc<AppConfig>,
    window: Window,
    document: Document,
    observers: ObserverRegistry,
    timers: TimerRegistry,
    listeners: ListenerSet,
    load_state: Rc<Cell<LoadState>>,
}

/// Counts of what [`App::destroy`] released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Teardown {
    pub observers: usize,
    pub timers: usize,
    pub listeners: usize,
}

impl App {
    pub fn new(window: Window, document: Document, config: AppConfig) -> Self {
        Self {
            config: Rc::new(config),
            window,
            document,
            observers: Rc::new(RefCell::new(Registry::new())),
            timers: Rc::new(RefCell::new(Registry::new())),
            listeners: Rc::new(RefCell::new(Vec::new())),
            load_state: Rc::new(Cell::new(LoadState::default())),
        }
    }

    pub fn config(&self) -> &Rc<AppConfig> {
        &self.config
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn lookup(&self) -> Lookup<'_> {
        Lookup::new(&self.document)
    }

    pub fn listen(&self, listener: Listener) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Shared handle for listeners attached after setup returns.
    pub fn listeners(&self) -> ListenerSet {
        Rc::clone(&self.listeners)
    }

    /// Registers `observer` under `name`, disconnecting any previous one.
    pub fn observe(&self, name: &'static str, observer: Observer) {
        if self.observers.borrow_mut().insert(name, observer) {
            self.log(LogLevel::Debug, "observer.replaced", json!({ "name": name }));
        }
    }

    pub fn track_timer(&self, name: &'static str, handle: impl Release + 'static) {
        if self.timers.borrow_mut().insert(name, Box::new(handle)) {
            self.log(LogLevel::Debug, "timer.replaced", json!({ "name": name }));
        }
    }

    pub fn timers(&self) -> TimerRegistry {
        Rc::clone(&self.timers)
    }

    /// Shared handle the loading overlay flips once it is gone.
    pub fn load_state(&self) -> Rc<Cell<LoadState>> {
        Rc::clone(&self.load_state)
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state.get().is_loaded()
    }

    pub fn log(&self, level: LogLevel, event: &str, fields: serde_json::Value) {
        telemetry::log_event(self.config.log_level, level, event, fields);
    }

    /// Runs every feature initializer in page order.
    pub fn setup(&mut self) -> Vec<FeatureReport> {
        let features: Vec<(&'static str, FeatureInit<'_, App>)> = vec![
            ("loading", Box::new(loading::setup)),
            ("navigation", Box::new(navigation::setup)),
            ("theme", Box::new(theme::setup)),
            ("mobile-menu", Box::new(menu::setup)),
            ("typing", Box::new(typing::setup)),
            ("scroll-reveal", Box::new(reveal::setup_scroll_reveal)),
            ("skill-bars", Box::new(reveal::setup_skill_bars)),
            ("particles", Box::new(particles::setup)),
            ("contact-form", Box::new(contact::setup)),
            ("lazy-images", Box::new(effects::setup_lazy_images)),
            ("accessibility", Box::new(a11y::setup)),
            ("advanced-animations", Box::new(effects::setup_animations)),
            ("external-links", Box::new(navigation::setup_external_link_guard)),
        ];

        run_features(self, features)
    }

    /// Disconnects every observer, cancels every timer and detaches every
    /// listener.
    pub fn destroy(&mut self) -> Teardown {
        let observers = self.observers.borrow_mut().release_all();
        let timers = self.timers.borrow_mut().release_all();
        let detached = std::mem::take(&mut *self.listeners.borrow_mut());
        let teardown = Teardown {
            observers,
            timers,
            listeners: detached.len(),
        };
        drop(detached);

        self.log(
            LogLevel::Info,
            "app.destroy",
            json!({
                "observers": teardown.observers,
                "timers": teardown.timers,
                "listeners": teardown.listeners,
                "loaded": self.is_loaded(),
            }),
        );
        teardown
    }

    fn log_reports(&self, reports: &[FeatureReport]) {
        for report in reports {
            let level = match report.outcome {
                FeatureOutcome::Ready => LogLevel::Info,
                FeatureOutcome::Skipped { .. } => LogLevel::Debug,
                FeatureOutcome::Failed(_) => LogLevel::Error,
            };
            self.log(level, "feature.setup", report.log_fields());
        }

        let summary = summarize(reports);
        self.log(
            LogLevel::Info,
            "app.ready",
            json!({
                "ready": summary.ready,
                "skipped": summary.skipped,
                "failed": summary.failed,
            }),
        );
    }
}

/// Reads the optional JSON override block. Errors leave the defaults in place.
fn load_config(document: &Document) -> (AppConfig, Option<SetupError>) {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty());

    match raw {
        Some(raw) => match AppConfig::from_json(&raw) {
            Ok(config) => (config, None),
            Err(error) => (AppConfig::default(), Some(error)),
        },
        None => (AppConfig::default(), None),
    }
}

pub fn run() {
    let Some(win) = window() else {
        return;
    };
    let Some(document) = win.document() else {
        return;
    };

    let (config, config_error) = load_config(&document);
    telemetry::init(config.log_level);

    let mut app = App::new(win, document, config);
    if let Some(error) = config_error {
        app.log(
            LogLevel::Warn,
            "config.invalid",
            json!({ "error": error.to_string() }),
        );
    }
    app.log(LogLevel::Info, "app.start", json!({ "config": CONFIG_ELEMENT_ID }));

    if let Err(error) = loading::mark_body_loading(&app) {
        app.log(
            LogLevel::Warn,
            "body.loading_class",
            json!({ "error": error.to_string() }),
        );
    }

    let reports = app.setup();
    app.log_reports(&reports);

    APP.with(|slot| {
        if let Some(mut previous) = slot.borrow_mut().replace(app) {
            previous.destroy();
        }
    });
}

/// Page-callable teardown.
#[wasm_bindgen(js_name = destroyPortfolio)]
pub fn destroy() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(mut app) = app {
        app.destroy();
    }
}
