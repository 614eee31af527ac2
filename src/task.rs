//! Start/pause/resume/cancel lifecycle for timer-driven animations.
//!
//! A `Task` wraps a `Step` state machine and hands out a generation token for
//! every scheduled tick. Pausing or cancelling bumps the generation, so a
//! tick that was already queued by the browser becomes a no-op when it fires.

use crate::registry::Release;

pub trait Step {
    /// Advances one tick. Returns the delay before the next tick, or `None`
    /// when the animation has nothing left to do.
    fn step(&mut self) -> Option<u32>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Idle,
    Running,
    Paused,
    Finished,
    Cancelled,
}

pub struct Task<S> {
    stepper: S,
    status: TaskStatus,
    generation: u64,
}

impl<S: Step> Task<S> {
    pub fn new(stepper: S) -> Self {
        Self {
            stepper,
            status: TaskStatus::Idle,
            generation: 0,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    /// Idle to running. Returns the token for the first tick.
    pub fn start(&mut self) -> Option<u64> {
        if self.status != TaskStatus::Idle {
            return None;
        }
        self.status = TaskStatus::Running;
        Some(self.bump())
    }

    pub fn pause(&mut self) -> bool {
        if self.status != TaskStatus::Running {
            return false;
        }
        self.status = TaskStatus::Paused;
        self.bump();
        true
    }

    /// Paused to running. Returns the token for the immediate restart tick.
    pub fn resume(&mut self) -> Option<u64> {
        if self.status != TaskStatus::Paused {
            return None;
        }
        self.status = TaskStatus::Running;
        Some(self.bump())
    }

    pub fn cancel(&mut self) {
        if matches!(self.status, TaskStatus::Cancelled | TaskStatus::Finished) {
            return;
        }
        self.status = TaskStatus::Cancelled;
        self.bump();
    }

    /// Runs one step if `token` is still current.
    pub fn tick(&mut self, token: u64) -> Option<u32> {
        if self.status != TaskStatus::Running || token != self.generation {
            return None;
        }

        match self.stepper.step() {
            Some(delay_ms) => Some(delay_ms),
            None => {
                self.status = TaskStatus::Finished;
                None
            }
        }
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

impl<S: Step> Release for Task<S> {
    fn release(&mut self) {
        self.cancel();
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::TimerTask;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Step, Task};
    use crate::registry::Release;
    use gloo_timers::callback::Timeout;
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    struct Shared<S> {
        task: RefCell<Task<S>>,
        timer: RefCell<Option<Timeout>>,
    }

    /// A `Task` driven by `setTimeout`. Clones share the same task.
    pub struct TimerTask<S: Step + 'static> {
        shared: Rc<Shared<S>>,
    }

    impl<S: Step + 'static> Clone for TimerTask<S> {
        fn clone(&self) -> Self {
            Self {
                shared: Rc::clone(&self.shared),
            }
        }
    }

    impl<S: Step + 'static> TimerTask<S> {
        pub fn new(stepper: S) -> Self {
            Self {
                shared: Rc::new(Shared {
                    task: RefCell::new(Task::new(stepper)),
                    timer: RefCell::new(None),
                }),
            }
        }

        /// Starts ticking. `None` runs the first tick synchronously.
        pub fn start(&self, first_delay_ms: Option<u32>) {
            let token = self.shared.task.borrow_mut().start();
            if let Some(token) = token {
                match first_delay_ms {
                    Some(delay_ms) => schedule(&self.shared, token, delay_ms),
                    None => run(&self.shared, token),
                }
            }
        }

        pub fn pause(&self) {
            if self.shared.task.borrow_mut().pause() {
                self.shared.timer.borrow_mut().take();
            }
        }

        pub fn resume(&self) {
            let token = self.shared.task.borrow_mut().resume();
            if let Some(token) = token {
                run(&self.shared, token);
            }
        }

        pub fn cancel(&self) {
            self.shared.task.borrow_mut().cancel();
            self.shared.timer.borrow_mut().take();
        }
    }

    impl<S: Step + 'static> Release for TimerTask<S> {
        fn release(&mut self) {
            self.cancel();
        }
    }

    fn schedule<S: Step + 'static>(shared: &Rc<Shared<S>>, token: u64, delay_ms: u32) {
        let weak: Weak<Shared<S>> = Rc::downgrade(shared);
        let timeout = Timeout::new(delay_ms, move || {
            if let Some(shared) = weak.upgrade() {
                run(&shared, token);
            }
        });
        *shared.timer.borrow_mut() = Some(timeout);
    }

    fn run<S: Step + 'static>(shared: &Rc<Shared<S>>, token: u64) {
        let next = shared.task.borrow_mut().tick(token);
        match next {
            Some(delay_ms) => schedule(shared, token, delay_ms),
            None => {
                shared.timer.borrow_mut().take();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Countdown {
        remaining: u32,
        steps: u32,
    }

    impl Step for Countdown {
        fn step(&mut self) -> Option<u32> {
            self.steps += 1;
            if self.remaining == 0 {
                return None;
            }
            self.remaining -= 1;
            Some(10)
        }
    }

    fn countdown(remaining: u32) -> Task<Countdown> {
        Task::new(Countdown {
            remaining,
            steps: 0,
        })
    }

    #[test]
    fn start_only_once() {
        let mut task = countdown(3);
        assert!(task.start().is_some());
        assert!(task.start().is_none());
        assert_eq!(task.status(), TaskStatus::Running);
    }

    #[test]
    fn ticks_until_the_stepper_finishes() {
        let mut task = countdown(2);
        let token = task.start().expect("idle task starts");

        assert_eq!(task.tick(token), Some(10));
        assert_eq!(task.tick(token), Some(10));
        assert_eq!(task.tick(token), None);
        assert_eq!(task.status(), TaskStatus::Finished);
        assert_eq!(task.tick(token), None);
        assert_eq!(task.stepper().steps, 3);
    }

    #[test]
    fn pause_invalidates_queued_tick_and_resume_issues_new_token() {
        let mut task = countdown(10);
        let first = task.start().expect("idle task starts");
        assert_eq!(task.tick(first), Some(10));

        assert!(task.pause());
        assert_eq!(task.tick(first), None);
        assert_eq!(task.stepper().steps, 1);

        let second = task.resume().expect("paused task resumes");
        assert_ne!(first, second);
        assert_eq!(task.tick(first), None);
        assert_eq!(task.tick(second), Some(10));
        assert_eq!(task.stepper().steps, 2);
    }

    #[test]
    fn resume_without_pause_is_ignored() {
        let mut task = countdown(1);
        assert!(task.resume().is_none());
        task.start();
        assert!(task.resume().is_none());
    }

    #[test]
    fn released_task_never_ticks_again() {
        let mut task = countdown(10);
        let token = task.start().expect("idle task starts");
        task.release();

        assert_eq!(task.status(), TaskStatus::Cancelled);
        assert_eq!(task.tick(token), None);
        assert!(task.resume().is_none());
        assert!(!task.pause());
    }

    /// Shares the task with the registry the way the browser timer does.
    struct Tracked(Rc<RefCell<Task<Countdown>>>);

    impl Release for Tracked {
        fn release(&mut self) {
            self.0.borrow_mut().release();
        }
    }

    #[test]
    fn teardown_stops_every_tracked_task() {
        let typing = Rc::new(RefCell::new(countdown(10)));
        let loading = Rc::new(RefCell::new(countdown(10)));
        let typing_token = typing.borrow_mut().start().expect("idle task starts");
        let loading_token = loading.borrow_mut().start().expect("idle task starts");
        assert_eq!(typing.borrow_mut().tick(typing_token), Some(10));

        let mut timers: Registry<Box<dyn Release>> = Registry::new();
        timers.insert("typing", Box::new(Tracked(Rc::clone(&typing))));
        timers.insert("loading", Box::new(Tracked(Rc::clone(&loading))));
        assert_eq!(timers.release_all(), 2);

        for (task, token) in [(&typing, typing_token), (&loading, loading_token)] {
            let mut task = task.borrow_mut();
            assert_eq!(task.status(), TaskStatus::Cancelled);
            assert_eq!(task.tick(token), None);
            assert!(task.resume().is_none());
        }
        assert_eq!(typing.borrow().stepper().steps, 1);
        assert_eq!(loading.borrow().stepper().steps, 0);
    }
}
