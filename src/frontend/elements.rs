//! Capability-checked element lookup.
//!
//! Features ask for the handles they need up front. An absent element comes
//! back as [`SetupError::Missing`] so the feature is reported as skipped
//! instead of failing halfway through its wiring.

use crate::error::SetupError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList};

pub struct Lookup<'a> {
    document: &'a Document,
}

impl<'a> Lookup<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn one<T: JsCast>(&self, selector: &'static str) -> Result<T, SetupError> {
        self.optional(selector)?
            .ok_or(SetupError::missing(selector))
    }

    pub fn optional<T: JsCast>(&self, selector: &'static str) -> Result<Option<T>, SetupError> {
        let found = self
            .document
            .query_selector(selector)
            .map_err(|error| SetupError::js("querySelector", js_message(&error)))?;
        Ok(found.and_then(|element| element.dyn_into::<T>().ok()))
    }

    pub fn all<T: JsCast>(&self, selector: &'static str) -> Result<Vec<T>, SetupError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|error| SetupError::js("querySelectorAll", js_message(&error)))?;
        Ok(collect(&nodes))
    }

    /// Like [`Lookup::all`], but an empty match means the feature is absent.
    pub fn non_empty<T: JsCast>(&self, selector: &'static str) -> Result<Vec<T>, SetupError> {
        let found = self.all(selector)?;
        if found.is_empty() {
            return Err(SetupError::missing(selector));
        }
        Ok(found)
    }
}

pub fn within<T: JsCast>(parent: &Element, selector: &'static str) -> Result<T, SetupError> {
    parent
        .query_selector(selector)
        .map_err(|error| SetupError::js("querySelector", js_message(&error)))?
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or(SetupError::missing(selector))
}

pub fn all_within<T: JsCast>(parent: &Element, selector: &str) -> Vec<T> {
    parent
        .query_selector_all(selector)
        .map(|nodes| collect(&nodes))
        .unwrap_or_default()
}

fn collect<T: JsCast>(nodes: &NodeList) -> Vec<T> {
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn clear_style(element: &HtmlElement, property: &str) {
    let _ = element.style().remove_property(property);
}

/// Reads a DOM property that `web-sys` only exposes through an enum feature.
pub fn string_property(target: &JsValue, name: &str) -> Option<String> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_string())
}

pub fn js_message(error: &JsValue) -> String {
    if let Some(message) = error.as_string() {
        return message;
    }
    string_property(error, "message").unwrap_or_else(|| format!("{error:?}"))
}
