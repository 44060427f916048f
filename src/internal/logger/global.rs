// src/internal/logger/global.rs
//
// Process-wide facade over a lazily constructed Logger writing to stdout.

use std::path::Path;
use std::sync::LazyLock;

use super::logger::{LastError, Logger, LoggerOptions};
use super::message::LogMessage;
use super::LoggerError;

static GLOBAL: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The shared logger behind the free functions
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Flushes the global logger when dropped.
///
/// The global logger lives in a static and is never dropped, so lines still
/// queued when `main` returns would be lost. Hold the guard returned by
/// [`configure`] until the end of `main`.
#[must_use = "dropping the guard flushes immediately; hold it until the program ends"]
#[derive(Debug)]
pub struct FlushGuard {
    _private: (),
}

impl Drop for FlushGuard {
    fn drop(&mut self) {
        GLOBAL.flush();
    }
}

pub fn configure(
    path: impl AsRef<Path>,
    options: LoggerOptions,
) -> Result<FlushGuard, LoggerError> {
    GLOBAL.configure(path, options)?;
    Ok(FlushGuard { _private: () })
}

pub fn log_error(message: impl Into<LogMessage>, sender: Option<&str>) {
    GLOBAL.error(message, sender);
}

pub fn log_debug(message: impl Into<LogMessage>, sender: Option<&str>) {
    GLOBAL.debug(message, sender);
}

pub fn log_warning(message: impl Into<LogMessage>, sender: Option<&str>) {
    GLOBAL.warning(message, sender);
}

pub fn log_info(message: impl Into<LogMessage>, sender: Option<&str>) {
    GLOBAL.info(message, sender);
}

pub fn log_success(message: impl Into<LogMessage>, sender: Option<&str>) {
    GLOBAL.success(message, sender);
}

pub fn log_text(message: impl Into<LogMessage>) {
    GLOBAL.text(message);
}

pub fn get_last_error() -> LastError {
    GLOBAL.last_error()
}

pub fn reset_last_error(value: Option<LogMessage>) {
    GLOBAL.reset_last_error(value);
}

/// Block until pending file writes of the global logger are done
pub fn flush() {
    GLOBAL.flush();
}

// Formatting macros over the global logger, e.g.
// `log_info!(sender: "db", "connected in {}ms", elapsed)`.
#[macro_export]
macro_rules! log_error {
    (sender: $sender:expr, $($arg:tt)*) => {
        $crate::internal::logger::log_error(format!($($arg)*), Some($sender))
    };
    ($($arg:tt)*) => {
        $crate::internal::logger::log_error(format!($($arg)*), None)
    };
}

#[macro_export]
macro_rules! log_debug {
    (sender: $sender:expr, $($arg:tt)*) => {
        $crate::internal::logger::log_debug(format!($($arg)*), Some($sender))
    };
    ($($arg:tt)*) => {
        $crate::internal::logger::log_debug(format!($($arg)*), None)
    };
}

#[macro_export]
macro_rules! log_warning {
    (sender: $sender:expr, $($arg:tt)*) => {
        $crate::internal::logger::log_warning(format!($($arg)*), Some($sender))
    };
    ($($arg:tt)*) => {
        $crate::internal::logger::log_warning(format!($($arg)*), None)
    };
}

#[macro_export]
macro_rules! log_info {
    (sender: $sender:expr, $($arg:tt)*) => {
        $crate::internal::logger::log_info(format!($($arg)*), Some($sender))
    };
    ($($arg:tt)*) => {
        $crate::internal::logger::log_info(format!($($arg)*), None)
    };
}

#[macro_export]
macro_rules! log_success {
    (sender: $sender:expr, $($arg:tt)*) => {
        $crate::internal::logger::log_success(format!($($arg)*), Some($sender))
    };
    ($($arg:tt)*) => {
        $crate::internal::logger::log_success(format!($($arg)*), None)
    };
}

#[macro_export]
macro_rules! log_text {
    ($($arg:tt)*) => {
        $crate::internal::logger::log_text(format!($($arg)*))
    };
}
