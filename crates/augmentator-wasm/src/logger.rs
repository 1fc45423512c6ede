//! `log` backend writing to the browser console.
//!
//! Core code reports corrected options with `log::warn!`; installing this
//! logger surfaces those messages in the developer tools.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let text = format_record(record.level(), &record.args().to_string());
        let message = JsValue::from_str(&text);
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            _ => web_sys::console::warn_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls are no-ops.
pub(crate) fn install() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Warn);
    }
}

fn format_record(level: Level, message: &str) -> String {
    format!("[augmentator] {}: {}", level, message)
}
