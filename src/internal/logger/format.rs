// src/internal/logger/format.rs

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

use super::severity::{Severity, COLOR_RESET};

/// Wall-clock timestamp layout, e.g. `2021-12-05 08:59:59`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, second resolution
pub fn local_time_text() -> String {
    format_timestamp(&Local::now())
}

/// Compose `<timestamp> <label> [<sender>] <body>`.
/// The sender segment is dropped entirely when absent or empty.
pub fn compose_entry(severity: Severity, timestamp: &str, sender: Option<&str>, body: &str) -> String {
    match sender.filter(|s| !s.is_empty()) {
        Some(sender) => format!("{} {} [{}] {}", timestamp, severity.label(), sender, body),
        None => format!("{} {} {}", timestamp, severity.label(), body),
    }
}

/// Wrap console output in the severity color followed by a reset.
/// Uncolored severities (`Info`, `Text`) still get the reset suffix.
pub fn colorize(severity: Severity, text: &str, ansi: bool) -> String {
    if !ansi {
        return text.to_string();
    }
    format!("{}{}{}", severity.color(), text, COLOR_RESET)
}
