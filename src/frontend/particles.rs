use super::elements::js_message;
use super::{App, Listener};
use crate::error::SetupError;
use crate::particles::{
    ParticleConfig, ParticleEnvironment, PARTICLES_CONTAINER_ID, PARTICLES_GLOBAL, THEME_CHANGE_EVENT,
};
use crate::telemetry::{log_event, LogLevel};
use crate::theme::Theme;
use crate::timing::Debounced;
use js_sys::{Function, Reflect};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Window};

const CONTAINER: &str = "#particles-js";
const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";

fn particles_function(window: &Window) -> Option<Function> {
    Reflect::get(window, &JsValue::from_str(PARTICLES_GLOBAL))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Reads everything the configuration depends on from the live page.
fn environment(window: &Window, document: &Document, breakpoint_px: f64) -> ParticleEnvironment {
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(breakpoint_px);
    let theme = document
        .document_element()
        .and_then(|root| root.get_attribute("data-theme"))
        .as_deref()
        .and_then(Theme::from_str)
        .unwrap_or(Theme::Light);
    let coarse_pointer = window
        .match_media(COARSE_POINTER_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());

    ParticleEnvironment {
        viewport_width,
        breakpoint_px,
        theme,
        coarse_pointer,
    }
}

struct ParticleRenderer {
    render: Function,
    window: Window,
    document: Document,
    breakpoint_px: f64,
    narrow: Cell<bool>,
}

impl ParticleRenderer {
    fn draw(&self) -> Result<(), SetupError> {
        let env = environment(&self.window, &self.document, self.breakpoint_px);
        let json = ParticleConfig::build(env)
            .to_json()
            .map_err(|error| SetupError::Config {
                message: error.to_string(),
            })?;
        let config = js_sys::JSON::parse(&json)
            .map_err(|error| SetupError::js("JSON.parse", js_message(&error)))?;

        self.render
            .call2(&JsValue::NULL, &JsValue::from_str(PARTICLES_CONTAINER_ID), &config)
            .map_err(|error| SetupError::js(PARTICLES_GLOBAL, js_message(&error)))?;
        self.narrow.set(env.is_narrow());
        Ok(())
    }

    /// Redraws only when the viewport moved across the breakpoint.
    fn resized(&self) -> Result<bool, SetupError> {
        let env = environment(&self.window, &self.document, self.breakpoint_px);
        if env.is_narrow() == self.narrow.get() {
            return Ok(false);
        }
        self.draw()?;
        Ok(true)
    }
}

fn report(min_level: LogLevel, event: &str, result: Result<bool, SetupError>) {
    match result {
        Ok(true) => log_event(min_level, LogLevel::Debug, event, json!({ "redrawn": true })),
        Ok(false) => {}
        Err(error) => log_event(
            min_level,
            LogLevel::Warn,
            event,
            json!({ "error": error.to_string() }),
        ),
    }
}

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    let render = particles_function(app.window()).ok_or(SetupError::missing(PARTICLES_GLOBAL))?;
    let _container: Element = app.lookup().one(CONTAINER)?;

    let renderer = Rc::new(ParticleRenderer {
        render,
        window: app.window().clone(),
        document: app.document().clone(),
        breakpoint_px: app.config().particle_breakpoint_px,
        narrow: Cell::new(false),
    });
    renderer.draw()?;

    let min_level = app.config().log_level;

    let on_theme = Rc::clone(&renderer);
    app.listen(Listener::new(app.document(), THEME_CHANGE_EVENT, move |_| {
        report(min_level, "particles.themechange", on_theme.draw().map(|()| true));
    })?);

    let on_resize = Rc::clone(&renderer);
    let debounced = Debounced::new(app.config().resize_debounce_ms, move |()| {
        report(min_level, "particles.resize", on_resize.resized());
    });
    app.listen(Listener::passive(app.window(), "resize", move |_| debounced.call(()))?);

    Ok(())
}
