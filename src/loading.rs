//! Loading overlay sequencing.

use crate::task::Step;

pub const LOADING_PHRASES: [&str; 4] = [
    "Loading...",
    "Loading assets...",
    "Almost ready...",
    "Welcome!",
];

pub const HERO_ANIMATION: &str = "slideInLeft 0.6s ease-out forwards";

/// Walks the status phrases once, one per tick, then stops.
pub struct PhraseCycle<F> {
    phrases: Vec<String>,
    next: usize,
    period_ms: u32,
    show: F,
}

impl<F: FnMut(&str)> PhraseCycle<F> {
    pub fn new<I, P>(phrases: I, period_ms: u32, show: F) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            next: 0,
            period_ms,
            show,
        }
    }

    pub fn shown(&self) -> usize {
        self.next
    }
}

impl<F: FnMut(&str)> Step for PhraseCycle<F> {
    fn step(&mut self) -> Option<u32> {
        let phrase = self.phrases.get(self.next)?;
        (self.show)(phrase);
        self.next += 1;
        if self.next < self.phrases.len() {
            Some(self.period_ms)
        } else {
            None
        }
    }
}

/// Whether the overlay sequence has completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
}

impl LoadState {
    /// Moves to [`LoadState::Loaded`]. Returns `false` when it already was.
    pub fn finish(&mut self) -> bool {
        let first = *self == Self::Loading;
        *self = Self::Loaded;
        first
    }

    pub fn is_loaded(self) -> bool {
        self == Self::Loaded
    }
}

/// Timeline after the page `load` event, in milliseconds from the event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DismissPlan {
    pub hide_at_ms: u32,
    pub remove_at_ms: u32,
}

impl DismissPlan {
    pub fn new(hide_delay_ms: u32, remove_delay_ms: u32) -> Self {
        Self {
            hide_at_ms: hide_delay_ms,
            remove_at_ms: hide_delay_ms.saturating_add(remove_delay_ms),
        }
    }
}

pub fn stagger_delay(index: usize, step_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(step_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskStatus};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn phrases_advance_once_each_and_stop_after_the_last() {
        let shown = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&shown);
        let mut task = Task::new(PhraseCycle::new(LOADING_PHRASES, 300, move |text: &str| {
            sink.borrow_mut().push(text.to_string())
        }));

        let token = task.start().expect("idle task starts");
        let mut delays = Vec::new();
        while let Some(delay) = task.tick(token) {
            delays.push(delay);
        }

        assert_eq!(*shown.borrow(), LOADING_PHRASES.to_vec());
        assert_eq!(delays, vec![300, 300, 300]);
        assert_eq!(task.status(), TaskStatus::Finished);
        assert_eq!(task.stepper().shown(), 4);
    }

    #[test]
    fn load_state_finishes_once() {
        let mut state = LoadState::default();
        assert!(!state.is_loaded());

        assert!(state.finish());
        assert!(state.is_loaded());
        assert!(!state.finish());
        assert_eq!(state, LoadState::Loaded);
    }

    #[test]
    fn cancelled_cycle_stops_showing_phrases() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut task = Task::new(PhraseCycle::new(LOADING_PHRASES, 300, move |_: &str| {
            *sink.borrow_mut() += 1
        }));

        let token = task.start().expect("idle task starts");
        task.tick(token);
        task.cancel();
        assert_eq!(task.tick(token), None);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn dismiss_plan_chains_hide_then_remove() {
        let plan = DismissPlan::new(800, 500);
        assert_eq!(plan.hide_at_ms, 800);
        assert_eq!(plan.remove_at_ms, 1_300);
    }

    #[test]
    fn hero_elements_are_staggered_by_index() {
        let delays: Vec<u32> = (0..4).map(|index| stagger_delay(index, 100)).collect();
        assert_eq!(delays, vec![0, 100, 200, 300]);
        assert_eq!(stagger_delay(usize::MAX, 100), u32::MAX);
    }
}
