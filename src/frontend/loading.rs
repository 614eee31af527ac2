use super::elements::{set_style, string_property, within, Lookup};
use super::schedule::{after, PendingTimeout};
use super::{App, Listener, TimerRegistry};
use crate::config::AppConfig;
use crate::error::SetupError;
use crate::loading::{
    stagger_delay, DismissPlan, LoadState, PhraseCycle, HERO_ANIMATION, LOADING_PHRASES,
};
use crate::task::TimerTask;
use crate::telemetry::{log_event, LogLevel};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use web_sys::{Document, Element, HtmlElement};

const SCREEN: &str = "#loading-screen";
const STATUS_TEXT: &str = ".loader-text";
const HERO_CHILDREN: &str = ".hero-text > *";
const BODY_LOADING_CLASS: &str = "loading";
const BODY_LOADED_CLASS: &str = "loaded";

const PHRASE_TIMER: &str = "loading";
const HIDE_TIMER: &str = "loading-hide";
const REMOVE_TIMER: &str = "loading-remove";

struct LoadingView {
    screen: HtmlElement,
    status: Element,
}

impl LoadingView {
    fn lookup(lookup: &Lookup<'_>) -> Result<Self, SetupError> {
        let screen: HtmlElement = lookup.one(SCREEN)?;
        let status = within(&screen, STATUS_TEXT)?;
        Ok(Self { screen, status })
    }
}

fn page_complete(document: &Document) -> bool {
    string_property(document, "readyState").as_deref() == Some("complete")
}

/// Runs `callback` on the window `load` event, or right away when the page
/// has already finished loading.
fn when_loaded(app: &App, callback: impl FnOnce() + 'static) -> Result<(), SetupError> {
    if page_complete(app.document()) {
        callback();
        return Ok(());
    }

    let mut pending = Some(callback);
    let listener = Listener::new(app.window(), "load", move |_| {
        if let Some(callback) = pending.take() {
            callback();
        }
    })?;
    app.listen(listener);
    Ok(())
}

pub fn mark_body_loading(app: &App) -> Result<(), SetupError> {
    if page_complete(app.document()) {
        return Ok(());
    }
    let body = app.document().body().ok_or(SetupError::missing("body"))?;
    let _ = body.class_list().add_1(BODY_LOADING_CLASS);
    when_loaded(app, move || {
        let _ = body.class_list().remove_1(BODY_LOADING_CLASS);
    })
}

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    let view = LoadingView::lookup(&app.lookup())?;
    let config = Rc::clone(app.config());

    let status = view.status.clone();
    let phrases = TimerTask::new(PhraseCycle::new(
        LOADING_PHRASES,
        config.loading_step_ms,
        move |phrase: &str| status.set_text_content(Some(phrase)),
    ));
    phrases.start(Some(config.loading_step_ms));
    app.track_timer(PHRASE_TIMER, phrases);

    let timers = app.timers();
    let document = app.document().clone();
    let state = app.load_state();
    when_loaded(app, move || dismiss(&timers, &config, view.screen, document, state))
}

fn dismiss(
    timers: &TimerRegistry,
    config: &AppConfig,
    screen: HtmlElement,
    document: Document,
    state: Rc<Cell<LoadState>>,
) {
    let min_level = config.log_level;
    let plan = DismissPlan::new(config.loading_hide_delay_ms, config.loading_remove_delay_ms);
    let hero_step_ms = config.hero_stagger_ms;
    log_event(
        config.log_level,
        LogLevel::Debug,
        "loading.dismiss",
        json!({ "hide_at_ms": plan.hide_at_ms, "remove_at_ms": plan.remove_at_ms }),
    );
    let mut timers = timers.borrow_mut();

    timers.remove(PHRASE_TIMER);

    let hide_target = screen.clone();
    timers.insert(
        HIDE_TIMER,
        Box::new(PendingTimeout::new(plan.hide_at_ms, move || {
            let _ = hide_target.class_list().add_1("hidden");
        })),
    );
    timers.insert(
        REMOVE_TIMER,
        Box::new(PendingTimeout::new(plan.remove_at_ms, move || {
            set_style(&screen, "display", "none");
            mark_loaded(&document, &state, min_level);
            animate_hero(&document, hero_step_ms);
        })),
    );
}

fn mark_loaded(document: &Document, state: &Cell<LoadState>, min_level: LogLevel) {
    let mut current = state.get();
    if !current.finish() {
        return;
    }
    state.set(current);
    if let Some(body) = document.body() {
        let _ = body.class_list().add_1(BODY_LOADED_CLASS);
    }
    log_event(min_level, LogLevel::Info, "loading.loaded", json!({}));
}

fn animate_hero(document: &Document, step_ms: u32) {
    let hero: Vec<HtmlElement> = Lookup::new(document)
        .all(HERO_CHILDREN)
        .unwrap_or_default();

    for (index, element) in hero.into_iter().enumerate() {
        after(stagger_delay(index, step_ms), move || {
            set_style(&element, "animation", HERO_ANIMATION);
        });
    }
}
