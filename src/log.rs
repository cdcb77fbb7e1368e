use serde_json::{Map, Number, Value};
use std::cell::Cell;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
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

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

thread_local! {
    static MIN_LEVEL: Cell<LogLevel> = const { Cell::new(LogLevel::Info) };
}

pub fn set_level(level: LogLevel) {
    MIN_LEVEL.with(|slot| slot.set(level));
}

pub fn enabled(level: LogLevel) -> bool {
    level >= MIN_LEVEL.with(Cell::get)
}

/// Emits one JSON line: `{"ts", "level", "event", ...fields}`.
pub fn log_event(level: LogLevel, event: &str, fields: Value) {
    if !enabled(level) {
        return;
    }

    let line = format_event(now_unix_millis(), level, event, fields);
    emit(level, line);
}

fn format_event(ts: u64, level: LogLevel, event: &str, fields: Value) -> String {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: String) {
    match level {
        LogLevel::Warn => gloo::console::warn!(line),
        LogLevel::Debug | LogLevel::Info => gloo::console::log!(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: String) {
    eprintln!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}
