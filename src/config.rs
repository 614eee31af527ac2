//! Page tunables.
//!
//! Defaults reproduce the shipped page. A page may embed
//! `<script type="application/json" id="portfolio-config">` to override any
//! subset; out-of-range numbers fall back to the default.

use crate::error::SetupError;
use crate::telemetry::LogLevel;
use serde::Deserialize;

pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

const DEFAULT_LOADING_STEP_MS: u32 = 300;
const DEFAULT_LOADING_HIDE_DELAY_MS: u32 = 800;
const DEFAULT_LOADING_REMOVE_DELAY_MS: u32 = 500;
const DEFAULT_HERO_STAGGER_MS: u32 = 100;
const DEFAULT_SCROLL_THROTTLE_MS: u32 = 16;
const DEFAULT_SCROLLED_THRESHOLD_PX: f64 = 50.0;
const DEFAULT_ACTIVE_PROBE_OFFSET_PX: f64 = 100.0;
const DEFAULT_ANCHOR_OFFSET_PX: f64 = 70.0;
const DEFAULT_SCROLL_FALLBACK_MS: u32 = 800;
const DEFAULT_TYPING_MIN_MS: u32 = 50;
const DEFAULT_TYPING_JITTER_MS: u32 = 100;
const DEFAULT_DELETING_MS: u32 = 50;
const DEFAULT_FULL_PHRASE_PAUSE_MS: u32 = 2_000;
const DEFAULT_NEXT_PHRASE_PAUSE_MS: u32 = 500;
const DEFAULT_REVEAL_STAGGER_MS: u32 = 100;
const DEFAULT_SKILL_BAR_DELAY_MS: u32 = 300;
const DEFAULT_COUNTER_DURATION_MS: u32 = 1_500;
const DEFAULT_PARALLAX_RATE: f64 = -0.5;
const DEFAULT_PARTICLE_BREAKPOINT_PX: f64 = 768.0;
const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 250;
const DEFAULT_SUBMIT_MIN_DELAY_MS: u32 = 1_000;
const DEFAULT_SUBMIT_JITTER_MS: u32 = 2_000;
const DEFAULT_SUCCESS_HIDE_MS: u32 = 5_000;
const DEFAULT_THEME_TRANSITION_MS: u32 = 300;
const DEFAULT_EXTERNAL_LINK_GUARD_DELAY_MS: u32 = 100;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SHORT_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);
const DURATION_MS_BOUNDS: (u32, u32) = (1, 60_000);
const PIXEL_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const PARALLAX_RATE_BOUNDS: (f64, f64) = (-2.0, 2.0);

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub loading_step_ms: u32,
    pub loading_hide_delay_ms: u32,
    pub loading_remove_delay_ms: u32,
    pub hero_stagger_ms: u32,
    pub scroll_throttle_ms: u32,
    pub scrolled_threshold_px: f64,
    pub active_probe_offset_px: f64,
    pub anchor_offset_px: f64,
    pub scroll_fallback_ms: u32,
    pub typing_min_ms: u32,
    pub typing_jitter_ms: u32,
    pub deleting_ms: u32,
    pub full_phrase_pause_ms: u32,
    pub next_phrase_pause_ms: u32,
    pub reveal_stagger_ms: u32,
    pub skill_bar_delay_ms: u32,
    pub counter_duration_ms: u32,
    pub parallax_rate: f64,
    pub particle_breakpoint_px: f64,
    pub resize_debounce_ms: u32,
    pub submit_min_delay_ms: u32,
    pub submit_jitter_ms: u32,
    pub success_hide_ms: u32,
    pub theme_transition_ms: u32,
    pub external_link_guard_delay_ms: u32,
    pub sequential_tab_order: bool,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            loading_step_ms: DEFAULT_LOADING_STEP_MS,
            loading_hide_delay_ms: DEFAULT_LOADING_HIDE_DELAY_MS,
            loading_remove_delay_ms: DEFAULT_LOADING_REMOVE_DELAY_MS,
            hero_stagger_ms: DEFAULT_HERO_STAGGER_MS,
            scroll_throttle_ms: DEFAULT_SCROLL_THROTTLE_MS,
            scrolled_threshold_px: DEFAULT_SCROLLED_THRESHOLD_PX,
            active_probe_offset_px: DEFAULT_ACTIVE_PROBE_OFFSET_PX,
            anchor_offset_px: DEFAULT_ANCHOR_OFFSET_PX,
            scroll_fallback_ms: DEFAULT_SCROLL_FALLBACK_MS,
            typing_min_ms: DEFAULT_TYPING_MIN_MS,
            typing_jitter_ms: DEFAULT_TYPING_JITTER_MS,
            deleting_ms: DEFAULT_DELETING_MS,
            full_phrase_pause_ms: DEFAULT_FULL_PHRASE_PAUSE_MS,
            next_phrase_pause_ms: DEFAULT_NEXT_PHRASE_PAUSE_MS,
            reveal_stagger_ms: DEFAULT_REVEAL_STAGGER_MS,
            skill_bar_delay_ms: DEFAULT_SKILL_BAR_DELAY_MS,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            parallax_rate: DEFAULT_PARALLAX_RATE,
            particle_breakpoint_px: DEFAULT_PARTICLE_BREAKPOINT_PX,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            submit_min_delay_ms: DEFAULT_SUBMIT_MIN_DELAY_MS,
            submit_jitter_ms: DEFAULT_SUBMIT_JITTER_MS,
            success_hide_ms: DEFAULT_SUCCESS_HIDE_MS,
            theme_transition_ms: DEFAULT_THEME_TRANSITION_MS,
            external_link_guard_delay_ms: DEFAULT_EXTERNAL_LINK_GUARD_DELAY_MS,
            sequential_tab_order: true,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

/// Raw page overrides. Every field is optional and unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigOverrides {
    loading_step_ms: Option<u32>,
    loading_hide_delay_ms: Option<u32>,
    loading_remove_delay_ms: Option<u32>,
    hero_stagger_ms: Option<u32>,
    scroll_throttle_ms: Option<u32>,
    scrolled_threshold_px: Option<f64>,
    active_probe_offset_px: Option<f64>,
    anchor_offset_px: Option<f64>,
    scroll_fallback_ms: Option<u32>,
    typing_min_ms: Option<u32>,
    typing_jitter_ms: Option<u32>,
    deleting_ms: Option<u32>,
    full_phrase_pause_ms: Option<u32>,
    next_phrase_pause_ms: Option<u32>,
    reveal_stagger_ms: Option<u32>,
    skill_bar_delay_ms: Option<u32>,
    counter_duration_ms: Option<u32>,
    parallax_rate: Option<f64>,
    particle_breakpoint_px: Option<f64>,
    resize_debounce_ms: Option<u32>,
    submit_min_delay_ms: Option<u32>,
    submit_jitter_ms: Option<u32>,
    success_hide_ms: Option<u32>,
    theme_transition_ms: Option<u32>,
    external_link_guard_delay_ms: Option<u32>,
    sequential_tab_order: Option<bool>,
    log_level: Option<String>,
}

fn bounded_u32(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn bounded_f64(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

impl AppConfig {
    /// Parses a JSON override block on top of the defaults.
    pub fn from_json(raw: &str) -> Result<Self, SetupError> {
        let overrides: ConfigOverrides =
            serde_json::from_str(raw).map_err(|error| SetupError::Config {
                message: error.to_string(),
            })?;

        Ok(Self::default().with_overrides(overrides))
    }

    fn with_overrides(self, o: ConfigOverrides) -> Self {
        Self {
            loading_step_ms: bounded_u32(o.loading_step_ms, self.loading_step_ms, DURATION_MS_BOUNDS),
            loading_hide_delay_ms: bounded_u32(
                o.loading_hide_delay_ms,
                self.loading_hide_delay_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            loading_remove_delay_ms: bounded_u32(
                o.loading_remove_delay_ms,
                self.loading_remove_delay_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            hero_stagger_ms: bounded_u32(o.hero_stagger_ms, self.hero_stagger_ms, SHORT_DELAY_MS_BOUNDS),
            scroll_throttle_ms: bounded_u32(
                o.scroll_throttle_ms,
                self.scroll_throttle_ms,
                DURATION_MS_BOUNDS,
            ),
            scrolled_threshold_px: bounded_f64(
                o.scrolled_threshold_px,
                self.scrolled_threshold_px,
                PIXEL_BOUNDS,
            ),
            active_probe_offset_px: bounded_f64(
                o.active_probe_offset_px,
                self.active_probe_offset_px,
                PIXEL_BOUNDS,
            ),
            anchor_offset_px: bounded_f64(o.anchor_offset_px, self.anchor_offset_px, PIXEL_BOUNDS),
            scroll_fallback_ms: bounded_u32(
                o.scroll_fallback_ms,
                self.scroll_fallback_ms,
                DURATION_MS_BOUNDS,
            ),
            typing_min_ms: bounded_u32(o.typing_min_ms, self.typing_min_ms, DURATION_MS_BOUNDS),
            typing_jitter_ms: bounded_u32(o.typing_jitter_ms, self.typing_jitter_ms, SHORT_DELAY_MS_BOUNDS),
            deleting_ms: bounded_u32(o.deleting_ms, self.deleting_ms, DURATION_MS_BOUNDS),
            full_phrase_pause_ms: bounded_u32(
                o.full_phrase_pause_ms,
                self.full_phrase_pause_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            next_phrase_pause_ms: bounded_u32(
                o.next_phrase_pause_ms,
                self.next_phrase_pause_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            reveal_stagger_ms: bounded_u32(
                o.reveal_stagger_ms,
                self.reveal_stagger_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            skill_bar_delay_ms: bounded_u32(
                o.skill_bar_delay_ms,
                self.skill_bar_delay_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            counter_duration_ms: bounded_u32(
                o.counter_duration_ms,
                self.counter_duration_ms,
                DURATION_MS_BOUNDS,
            ),
            parallax_rate: bounded_f64(o.parallax_rate, self.parallax_rate, PARALLAX_RATE_BOUNDS),
            particle_breakpoint_px: bounded_f64(
                o.particle_breakpoint_px,
                self.particle_breakpoint_px,
                PIXEL_BOUNDS,
            ),
            resize_debounce_ms: bounded_u32(
                o.resize_debounce_ms,
                self.resize_debounce_ms,
                DURATION_MS_BOUNDS,
            ),
            submit_min_delay_ms: bounded_u32(
                o.submit_min_delay_ms,
                self.submit_min_delay_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            submit_jitter_ms: bounded_u32(o.submit_jitter_ms, self.submit_jitter_ms, SHORT_DELAY_MS_BOUNDS),
            success_hide_ms: bounded_u32(o.success_hide_ms, self.success_hide_ms, DURATION_MS_BOUNDS),
            theme_transition_ms: bounded_u32(
                o.theme_transition_ms,
                self.theme_transition_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            external_link_guard_delay_ms: bounded_u32(
                o.external_link_guard_delay_ms,
                self.external_link_guard_delay_ms,
                SHORT_DELAY_MS_BOUNDS,
            ),
            sequential_tab_order: o.sequential_tab_order.unwrap_or(self.sequential_tab_order),
            log_level: o
                .log_level
                .as_deref()
                .and_then(LogLevel::parse)
                .unwrap_or(self.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_keeps_defaults() {
        let config = AppConfig::from_json("{}").expect("valid json");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn overrides_apply_and_unknown_keys_are_ignored() {
        let config = AppConfig::from_json(
            r#"{ "loadingStepMs": 120, "sequentialTabOrder": false, "logLevel": "debug", "colour": "red" }"#,
        )
        .expect("valid json");

        assert_eq!(config.loading_step_ms, 120);
        assert!(!config.sequential_tab_order);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.typing_min_ms, DEFAULT_TYPING_MIN_MS);
    }

    #[test]
    fn out_of_range_values_fall_back_to_default() {
        let config = AppConfig::from_json(
            r#"{ "counterDurationMs": 0, "parallaxRate": 9.5, "anchorOffsetPx": -4 }"#,
        )
        .expect("valid json");

        assert_eq!(config.counter_duration_ms, DEFAULT_COUNTER_DURATION_MS);
        assert_eq!(config.parallax_rate, DEFAULT_PARALLAX_RATE);
        assert_eq!(config.anchor_offset_px, DEFAULT_ANCHOR_OFFSET_PX);
    }

    #[test]
    fn unknown_log_level_keeps_default() {
        let config = AppConfig::from_json(r#"{ "logLevel": "verbose" }"#).expect("valid json");
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let error = AppConfig::from_json("{ nope").expect_err("invalid json");
        assert!(matches!(error, SetupError::Config { .. }));
    }
}
