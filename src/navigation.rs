//! Scroll-position bookkeeping for the navbar.

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Where a nav link points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// `#about`: scrolled to in place.
    InPage(String),
    /// Anything else is left to the browser.
    Page(String),
}

impl LinkTarget {
    pub fn parse(href: &str) -> Option<Self> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        if href.starts_with('#') {
            Some(Self::InPage(href.to_string()))
        } else {
            Some(Self::Page(href.to_string()))
        }
    }
}

pub fn is_scrolled(scroll_y: f64, threshold_px: f64) -> bool {
    scroll_y > threshold_px
}

/// First section, in document order, whose bounds contain the probe point.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, probe_offset_px: f64) -> Option<&str> {
    let probe = scroll_y + probe_offset_px;
    sections
        .iter()
        .find(|section| section.contains(probe))
        .map(|section| section.id.as_str())
}

/// One flag per link, `true` only for links pointing at `#<section_id>`.
pub fn active_link_flags(hrefs: &[String], section_id: &str) -> Vec<bool> {
    let target = format!("#{section_id}");
    let mut found = false;
    hrefs
        .iter()
        .map(|href| {
            let matches = !found && *href == target;
            found |= matches;
            matches
        })
        .collect()
}

pub fn anchor_scroll_target(offset_top: f64, anchor_offset_px: f64) -> f64 {
    offset_top - anchor_offset_px
}

pub fn ease_in_out_quad(progress: f64) -> f64 {
    if progress < 0.5 {
        2.0 * progress * progress
    } else {
        -1.0 + (4.0 - 2.0 * progress) * progress
    }
}

/// Frame-by-frame scroll for browsers without native smooth scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    start: f64,
    change: f64,
    duration_ms: f64,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, duration_ms: u32) -> Self {
        Self {
            start: from,
            change: to - from,
            duration_ms: f64::from(duration_ms.max(1)),
        }
    }

    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn position_at(&self, elapsed_ms: f64) -> f64 {
        self.start + self.change * ease_in_out_quad(self.progress(elapsed_ms))
    }

    pub fn is_done(&self, elapsed_ms: f64) -> bool {
        self.progress(elapsed_ms) >= 1.0
    }
}

pub fn is_activation_key(key: &str) -> bool {
    key == "Enter" || key == " "
}
