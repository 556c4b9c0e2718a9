use serde::Deserialize;
use std::cmp::Ordering;

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        DEFAULT_LOG_LEVEL
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Logger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Emits the event when `level` passes the filter and hands back the
    /// payload that was written.
    pub fn event(&self, level: LogLevel, event: &str, fields: serde_json::Value) -> Option<serde_json::Value> {
        if !self.enabled(level) {
            return None;
        }

        let payload = build_payload(now_unix_millis(), level, event, fields);
        emit(level, &payload);
        Some(payload)
    }

    pub fn debug(&self, event: &str, fields: serde_json::Value) -> Option<serde_json::Value> {
        self.event(LogLevel::Debug, event, fields)
    }

    pub fn info(&self, event: &str, fields: serde_json::Value) -> Option<serde_json::Value> {
        self.event(LogLevel::Info, event, fields)
    }

    pub fn warn(&self, event: &str, fields: serde_json::Value) -> Option<serde_json::Value> {
        self.event(LogLevel::Warn, event, fields)
    }
}

fn build_payload(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, payload: &serde_json::Value) {
    let line = wasm_bindgen::JsValue::from_str(&payload.to_string());
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::info_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, payload: &serde_json::Value) {
    println!("{payload}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_merges_fields_after_envelope() {
        let payload = build_payload(
            42,
            LogLevel::Warn,
            "modal.open_failed",
            json!({ "kind": "education", "index": 7 }),
        );

        assert_eq!(payload["ts"], 42);
        assert_eq!(payload["level"], "warn");
        assert_eq!(payload["event"], "modal.open_failed");
        assert_eq!(payload["kind"], "education");
        assert_eq!(payload["index"], 7);
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = build_payload(1, LogLevel::Info, "site.ready", json!("loose"));

        assert_eq!(payload.as_object().map(|map| map.len()), Some(3));
    }

    #[test]
    fn suppressed_events_write_nothing() {
        let logger = Logger::new(LogLevel::Warn);

        assert_eq!(logger.debug("language.applied", json!({ "language": "zh" })), None);
        assert_eq!(logger.info("site.ready", json!({})), None);

        let written = logger
            .warn("component.failed", json!({ "component": "particles" }))
            .expect("warn passes a warn filter");
        assert_eq!(written["level"], "warn");
        assert_eq!(written["component"], "particles");
    }

    #[test]
    fn logger_filters_below_minimum_level() {
        let logger = Logger::new(LogLevel::Info);

        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
    }
}
