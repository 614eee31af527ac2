use super::elements::js_message;
use crate::error::SetupError;
use crate::registry::Release;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Event, EventTarget};

/// An attached event listener. Dropping it detaches the callback.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|error| SetupError::js("addEventListener", js_message(&error)))?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback: Some(callback),
        })
    }

    /// Scroll-style listener that promises never to call `preventDefault`.
    pub fn passive(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SetupError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|error| SetupError::js("addEventListener", js_message(&error)))?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback: Some(callback),
        })
    }
}

impl Release for Listener {
    fn release(&mut self) {
        if let Some(callback) = self.callback.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.release();
    }
}
