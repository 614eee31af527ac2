//! Rate limiting for event handlers.
//!
//! `Throttle` and `Debounce` are clock-free state machines; callers pass the
//! current time in milliseconds. The wasm wrappers below feed them
//! `Date::now()`; `Debounced` wakes on a `gloo_timers` timeout and asks
//! [`Debounce::due`] whether the quiet period is over.

#[derive(Clone, Debug)]
pub struct Throttle {
    window_ms: f64,
    ready_at: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: f64::from(window_ms),
            ready_at: None,
        }
    }

    /// Returns `true` when the call should run. Calls inside the cooldown are
    /// dropped, never queued.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.ready_at {
            Some(ready_at) if now_ms < ready_at => false,
            _ => {
                self.ready_at = Some(now_ms + self.window_ms);
                true
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Debounce<A> {
    wait_ms: f64,
    deadline: Option<f64>,
    pending: Option<A>,
}

impl<A> Debounce<A> {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms: f64::from(wait_ms),
            deadline: None,
            pending: None,
        }
    }

    /// Records a call and pushes the deadline back. Returns the new deadline.
    pub fn call(&mut self, now_ms: f64, args: A) -> f64 {
        let deadline = now_ms + self.wait_ms;
        self.deadline = Some(deadline);
        self.pending = Some(args);
        deadline
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    /// Hands back the latest arguments once the input has been quiet for the
    /// full wait.
    pub fn due(&mut self, now_ms: f64) -> Option<A> {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{throttled, Debounced};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Debounce, Throttle};
    use gloo_timers::callback::Timeout;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub fn throttled<A>(window_ms: u32, mut callback: impl FnMut(A)) -> impl FnMut(A) {
        let mut throttle = Throttle::new(window_ms);
        move |args| {
            if throttle.admit(js_sys::Date::now()) {
                callback(args);
            }
        }
    }

    struct DebouncedInner<A> {
        state: Debounce<A>,
        timer: Option<Timeout>,
    }

    /// Trailing-edge debounced callback. Dropping it cancels any pending call.
    pub struct Debounced<A: 'static> {
        inner: Rc<RefCell<DebouncedInner<A>>>,
        callback: Rc<RefCell<dyn FnMut(A)>>,
        wait_ms: u32,
    }

    impl<A: 'static> Debounced<A> {
        pub fn new(wait_ms: u32, callback: impl FnMut(A) + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(DebouncedInner {
                    state: Debounce::new(wait_ms),
                    timer: None,
                })),
                callback: Rc::new(RefCell::new(callback)),
                wait_ms,
            }
        }

        pub fn call(&self, args: A) {
            self.inner
                .borrow_mut()
                .state
                .call(js_sys::Date::now(), args);
            arm(&self.inner, &self.callback, self.wait_ms);
        }

        pub fn cancel(&self) {
            let mut inner = self.inner.borrow_mut();
            inner.state.cancel();
            inner.timer = None;
        }
    }

    /// Schedules a check of the deadline. A timer that fires early re-arms
    /// for the remainder instead of running the callback.
    fn arm<A: 'static>(
        inner: &Rc<RefCell<DebouncedInner<A>>>,
        callback: &Rc<RefCell<dyn FnMut(A)>>,
        delay_ms: u32,
    ) {
        let weak = Rc::downgrade(inner);
        let callback = Rc::clone(callback);
        let timer = Timeout::new(delay_ms, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let now = js_sys::Date::now();
            let ready = inner.borrow_mut().state.due(now);
            match ready {
                Some(args) => (callback.borrow_mut())(args),
                None => {
                    let remaining = inner.borrow().state.deadline().map(|deadline| deadline - now);
                    if let Some(remaining) = remaining {
                        arm(&inner, &callback, remaining.max(0.0).ceil() as u32);
                    }
                }
            }
        });

        // Replacing the handle drops the previous timeout, which cancels it.
        inner.borrow_mut().timer = Some(timer);
    }

    impl<A: 'static> Drop for Debounced<A> {
        fn drop(&mut self) {
            self.cancel();
        }
    }
}
