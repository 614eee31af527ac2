//! Scroll-driven entrance effects: reveal classes, skill counters, parallax.

pub const REVEAL_TARGETS: &str = "section, .skill-item, .project-card, .service-card";
pub const REVEAL_CHILDREN: &str = ".skill-item, .project-card, .service-card";
pub const REVEAL_THRESHOLDS: [f64; 3] = [0.1, 0.3, 0.5];
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const SKILL_THRESHOLD: f64 = 0.5;
pub const ANIMATE_THRESHOLD: f64 = 0.1;

/// Leading integer of a `data-width` attribute. Values above 100 pass
/// through unchanged.
pub fn parse_percentage(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .trim_end_matches('%')
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u32>().ok()
}

/// Linear 0..N counter, floored on every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterAnimation {
    start: f64,
    end: f64,
    duration_ms: f64,
}

impl CounterAnimation {
    pub fn new(start: u32, end: u32, duration_ms: u32) -> Self {
        Self {
            start: f64::from(start),
            end: f64::from(end),
            duration_ms: f64::from(duration_ms.max(1)),
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, elapsed_ms: f64) -> u32 {
        let current = self.start + (self.end - self.start) * self.progress(elapsed_ms);
        current.floor().max(0.0) as u32
    }

    pub fn label_at(&self, elapsed_ms: f64) -> String {
        format!("{}%", self.value_at(elapsed_ms))
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}

pub fn parallax_transform(scroll_y: f64, rate: f64) -> String {
    let offset = scroll_y * rate;
    let offset = if offset == 0.0 { 0.0 } else { offset };
    format!("translateY({offset}px)")
}

pub fn animate_class(kind: &str) -> Option<String> {
    let kind = kind.trim();
    if kind.is_empty() || kind.contains(char::is_whitespace) {
        return None;
    }
    Some(format!("animate-{kind}"))
}

pub fn fade_in_delay(index: usize) -> String {
    format!("{}s", index as f64 * 0.1)
}

/// Pull a button 10% of the way towards the pointer.
pub fn magnetic_transform(
    pointer: (f64, f64),
    rect_origin: (f64, f64),
    rect_size: (f64, f64),
) -> String {
    let x = pointer.0 - rect_origin.0 - rect_size.0 / 2.0;
    let y = pointer.1 - rect_origin.1 - rect_size.1 / 2.0;
    format!("translate({}px, {}px)", x * 0.1, y * 0.1)
}
