// src/internal/logger/severity.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const COLOR_RESET: &str = "\x1b[0m";
const COLOR_YELLOW: &str = "\x1b[33m";
const COLOR_RED: &str = "\x1b[31m";
const COLOR_GREEN: &str = "\x1b[32m";

/// Severity represents the category of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "success")]
    Success,
    /// Raw pass-through content, never timestamped or labelled
    #[serde(rename = "text")]
    Text,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Warning,
        Severity::Error,
        Severity::Info,
        Severity::Success,
        Severity::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Text => "text",
        }
    }

    /// Display label used in formatted entries. Empty for `Text`.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "[DEBUG]",
            Severity::Warning => "[WARNING]",
            Severity::Error => "[ERROR]",
            Severity::Info => "[INFO]",
            Severity::Success => "[SUCCESS]",
            Severity::Text => "",
        }
    }

    /// ANSI color prefix for console rendering
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Debug | Severity::Warning => COLOR_YELLOW,
            Severity::Error => COLOR_RED,
            Severity::Success => COLOR_GREEN,
            Severity::Info | Severity::Text => "",
        }
    }

    /// Whether entries of this severity go through the timestamp/sender formatter
    pub fn is_formatted(&self) -> bool {
        !matches!(self, Severity::Text)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unknown severity tag '{0}' (expected one of debug, warning, error, info, success, text)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "text" => Ok(Severity::Text),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_bracketed_uppercase_names() {
        for severity in Severity::ALL {
            if severity == Severity::Text {
                assert_eq!(severity.label(), "");
            } else {
                let expected = format!("[{}]", severity.as_str().to_uppercase());
                assert_eq!(severity.label(), expected);
            }
        }
    }

    #[test]
    fn text_and_info_carry_no_color() {
        assert_eq!(Severity::Text.color(), "");
        assert_eq!(Severity::Info.color(), "");
        assert_eq!(Severity::Error.color(), "\x1b[31m");
        assert_eq!(Severity::Warning.color(), Severity::Debug.color());
    }

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("DEBUG".parse::<Severity>(), Ok(Severity::Debug));
        assert_eq!(" text ".parse::<Severity>(), Ok(Severity::Text));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let tags: Vec<Severity> = serde_json::from_str(r#"["debug", "text"]"#).unwrap();
        assert_eq!(tags, vec![Severity::Debug, Severity::Text]);
        assert_eq!(serde_json::to_string(&Severity::Success).unwrap(), "\"success\"");
    }
}
