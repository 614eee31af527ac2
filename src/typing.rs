//! Typewriter phrase cycling.

pub const PHRASES: [&str; 6] = [
    "Web Developer",
    "Engineer",
    "Cricketer",
    "Problem Solver",
    "Creative Thinker",
    "Full Stack Developer",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingSpeeds {
    pub typing_min_ms: u32,
    pub typing_jitter_ms: u32,
    pub deleting_ms: u32,
    pub full_phrase_pause_ms: u32,
    pub next_phrase_pause_ms: u32,
}

impl Default for TypingSpeeds {
    fn default() -> Self {
        Self {
            typing_min_ms: 50,
            typing_jitter_ms: 100,
            deleting_ms: 50,
            full_phrase_pause_ms: 2_000,
            next_phrase_pause_ms: 500,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypingState {
    pub phrase_index: usize,
    pub char_index: usize,
    pub deleting: bool,
}

/// Output of one tick: the text to show and how long to wait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u32,
}

pub struct Typewriter {
    phrases: Vec<String>,
    speeds: TypingSpeeds,
    state: TypingState,
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new<I, P>(phrases: I, speeds: TypingSpeeds) -> Option<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(Into::into)
            .filter(|phrase| !phrase.is_empty())
            .collect();

        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases,
            speeds,
            state: TypingState::default(),
        })
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.state.phrase_index]
    }

    fn phrase_len(&self) -> usize {
        self.current_phrase().chars().count()
    }

    /// `jitter` is a uniform sample in `[0, 1)` that picks the typing speed.
    pub fn tick(&mut self, jitter: f64) -> TypingFrame {
        let len = self.phrase_len();
        let mut delay_ms;

        if self.state.deleting {
            self.state.char_index = self.state.char_index.saturating_sub(1);
            delay_ms = self.speeds.deleting_ms;
        } else {
            self.state.char_index = (self.state.char_index + 1).min(len);
            let jitter = jitter.clamp(0.0, 1.0);
            delay_ms = self.speeds.typing_min_ms
                + (f64::from(self.speeds.typing_jitter_ms) * jitter).floor() as u32;
        }

        let text: String = self
            .current_phrase()
            .chars()
            .take(self.state.char_index)
            .collect();

        if !self.state.deleting && self.state.char_index == len {
            delay_ms = self.speeds.full_phrase_pause_ms;
            self.state.deleting = true;
        } else if self.state.deleting && self.state.char_index == 0 {
            self.state.deleting = false;
            self.state.phrase_index = (self.state.phrase_index + 1) % self.phrases.len();
            delay_ms = self.speeds.next_phrase_pause_ms;
        }

        TypingFrame { text, delay_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> Typewriter {
        Typewriter::new(PHRASES, TypingSpeeds::default()).expect("phrases present")
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        assert!(Typewriter::new(Vec::<String>::new(), TypingSpeeds::default()).is_none());
        assert!(Typewriter::new(["", ""], TypingSpeeds::default()).is_none());
    }

    #[test]
    fn types_forward_then_pauses_and_switches_to_deleting() {
        let mut writer = writer();
        let len = "Web Developer".len();

        for step in 1..len {
            let frame = writer.tick(0.5);
            assert_eq!(frame.text, &"Web Developer"[..step]);
            assert_eq!(frame.delay_ms, 100);
            assert!(!writer.state().deleting);
        }

        let frame = writer.tick(0.5);
        assert_eq!(frame.text, "Web Developer");
        assert_eq!(frame.delay_ms, 2_000);
        assert!(writer.state().deleting);
    }

    #[test]
    fn typing_speed_stays_in_range() {
        let mut writer = writer();
        assert_eq!(writer.tick(0.0).delay_ms, 50);
        assert_eq!(writer.tick(0.999_999).delay_ms, 149);
    }

    #[test]
    fn deleting_to_empty_advances_to_next_phrase() {
        let mut writer = writer();
        let len = PHRASES[0].len();
        for _ in 0..len {
            writer.tick(0.0);
        }

        for remaining in (1..len).rev() {
            let frame = writer.tick(0.0);
            assert_eq!(frame.text.len(), remaining);
            assert_eq!(frame.delay_ms, 50);
        }

        let frame = writer.tick(0.0);
        assert_eq!(frame.text, "");
        assert_eq!(frame.delay_ms, 500);
        assert_eq!(writer.state().phrase_index, 1);
        assert!(!writer.state().deleting);
        assert_eq!(writer.current_phrase(), "Engineer");
    }

    #[test]
    fn char_index_stays_within_phrase_bounds_and_wraps() {
        let mut writer = writer();
        let mut completed_cycles = 0;
        let mut last_phrase = 0;

        for _ in 0..2_000 {
            writer.tick(0.3);
            let state = writer.state();
            assert!(state.char_index <= writer.current_phrase().chars().count());
            if state.phrase_index < last_phrase {
                completed_cycles += 1;
            }
            last_phrase = state.phrase_index;
        }

        assert!(completed_cycles >= 1);
    }

    #[test]
    fn multibyte_phrases_are_sliced_on_char_boundaries() {
        let mut writer =
            Typewriter::new(["Café"], TypingSpeeds::default()).expect("phrase present");
        let texts: Vec<String> = (0..4).map(|_| writer.tick(0.0).text).collect();
        assert_eq!(texts, vec!["C", "Ca", "Caf", "Café"]);
    }
}
