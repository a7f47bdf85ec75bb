//! Process-wide debug file log for wire-level traces
//!
//! Off unless `YXI_DEBUG` is `1` or `true`. When on, request/response traces
//! from the tool client are appended to `yxi-debug.log` in the temp dir.
//! `YXI_LOG_LEVEL` (trace, debug, info, warn, error) sets the threshold.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::SystemTime;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

struct FileLogState {
    file: Option<File>,
    min_level: LogLevel,
}

impl FileLogState {
    fn from_env() -> Self {
        let enabled = std::env::var("YXI_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let min_level = std::env::var("YXI_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);

        // The file is only opened when logging is on
        let file = if enabled {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file_path())
                .ok()
        } else {
            None
        };

        Self { file, min_level }
    }

    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if level < self.min_level {
            return;
        }
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let stamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| format!("{}.{:03}", d.as_secs(), d.subsec_millis()))
            .unwrap_or_else(|_| "?".to_string());

        let _ = writeln!(file, "[{}] [{}] [{}] {}", stamp, level, module, message);
        let _ = file.flush();
    }
}

static STATE: Lazy<Mutex<FileLogState>> = Lazy::new(|| Mutex::new(FileLogState::from_env()));

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    STATE.lock().write(level, module, message);
}

pub fn trace(module: &str, message: &str) {
    log(LogLevel::Trace, module, message);
}

pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

/// Whether the debug file log is active for this process
pub fn is_enabled() -> bool {
    STATE.lock().file.is_some()
}

/// Path of the debug file log
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("yxi-debug.log")
}
