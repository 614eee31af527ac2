//! One-shot timers and animation-frame loops.

use crate::registry::Release;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast};

/// A single delayed call that can be cancelled through the timer registry.
pub struct PendingTimeout(Option<Timeout>);

impl PendingTimeout {
    pub fn new(delay_ms: u32, callback: impl FnOnce() + 'static) -> Self {
        Self(Some(Timeout::new(delay_ms, callback)))
    }
}

impl Release for PendingTimeout {
    fn release(&mut self) {
        // Dropping a gloo `Timeout` clears it.
        self.0 = None;
    }
}

/// Fire-and-forget delay for purely visual staggering.
pub fn after(delay_ms: u32, callback: impl FnOnce() + 'static) {
    Timeout::new(delay_ms, callback).forget();
}

pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|win| win.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls `frame` with the elapsed milliseconds on every animation frame until
/// it returns `false`.
pub fn run_frames(mut frame: impl FnMut(f64) -> bool + 'static) {
    let Some(win) = web_sys::window() else {
        return;
    };

    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let slot_for_frame = Rc::clone(&slot);
    let win_for_frame = win.clone();
    let started = now_ms();

    *slot.borrow_mut() = Some(Closure::new(move |now: f64| {
        if frame((now - started).max(0.0)) {
            if let Some(callback) = slot_for_frame.borrow().as_ref() {
                let _ = win_for_frame.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        } else {
            // Breaks the slot -> closure -> slot cycle.
            slot_for_frame.borrow_mut().take();
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}
