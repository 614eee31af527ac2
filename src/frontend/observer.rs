use super::elements::js_message;
use crate::error::SetupError;
use crate::registry::Release;
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An `IntersectionObserver` that forwards only entries coming into view.
pub struct Observer {
    observer: IntersectionObserver,
    connected: bool,
    _callback: EntriesCallback,
}

impl Observer {
    pub fn new(
        thresholds: &[f64],
        root_margin: Option<&str>,
        mut on_visible: impl FnMut(Element, &IntersectionObserver) + 'static,
    ) -> Result<Self, SetupError> {
        let callback = EntriesCallback::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_visible(entry.target(), &observer);
                }
            }
        });

        let options = IntersectionObserverInit::new();
        let threshold: Array = thresholds.iter().copied().map(JsValue::from_f64).collect();
        options.set_threshold(&threshold);
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|error| SetupError::js("IntersectionObserver", js_message(&error)))?;

        Ok(Self {
            observer,
            connected: true,
            _callback: callback,
        })
    }

    /// No-op once released.
    pub fn observe(&self, target: &Element) {
        if self.connected {
            self.observer.observe(target);
        }
    }
}

impl Release for Observer {
    fn release(&mut self) {
        self.observer.disconnect();
        self.connected = false;
    }
}
