//! Structured console logging.
//!
//! Every event is a single JSON object so the browser console can be filtered
//! by `event` name. Levels below the configured minimum are dropped before
//! the payload is built.

/// Declared from least to most severe; the derived order is the filter order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    fn to_log(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

/// Installs the console logger and panic hook. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init(min_level: LogLevel) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(min_level.to_log());
}

pub fn event_payload(level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

pub fn log_event(min_level: LogLevel, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < min_level {
        return;
    }

    log::log!(
        level.to_log(),
        "{}",
        event_payload(level, event, fields)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_order_from_debug_to_error() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(LogLevel::parse(" INFO "), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
    }

    #[test]
    fn payload_merges_fields_after_level_and_event() {
        let payload = event_payload(
            LogLevel::Warn,
            "feature_failed",
            json!({ "feature": "navigation", "error": "boom" }),
        );

        assert_eq!(payload["level"], "warn");
        assert_eq!(payload["event"], "feature_failed");
        assert_eq!(payload["feature"], "navigation");
        assert_eq!(payload["error"], "boom");
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = event_payload(LogLevel::Info, "app_started", json!("ignored"));
        let object = payload.as_object().expect("payload is an object");
        assert_eq!(object.len(), 2);
    }
}
