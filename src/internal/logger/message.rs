// src/internal/logger/message.rs

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// LogMessage is a loggable payload, resolved once at the call site
#[derive(Debug, Clone, PartialEq)]
pub enum LogMessage {
    /// Plain text, emitted verbatim
    Text(String),
    /// An error value; its descriptive message is what gets logged
    Error { message: String },
    /// Any other value. A truthy `message` field on an object wins over the dump.
    Value(Value),
}

impl LogMessage {
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        LogMessage::Error {
            message: err.to_string(),
        }
    }

    /// Capture any serializable value. Values that fail to serialize fall back
    /// to a null payload rather than failing the log call.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        LogMessage::Value(serde_json::to_value(value).unwrap_or(Value::Null))
    }

    /// Render the payload into the body text of a log entry
    pub fn render(&self) -> String {
        match self {
            LogMessage::Text(text) => text.clone(),
            LogMessage::Error { message } => message.clone(),
            LogMessage::Value(value) => render_value(value),
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(field) if is_truthy(field) => field.to_string(),
            _ => pretty(value),
        },
        Value::Array(_) => pretty(value),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        LogMessage::Text(text.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        LogMessage::Text(text)
    }
}

impl From<&String> for LogMessage {
    fn from(text: &String) -> Self {
        LogMessage::Text(text.clone())
    }
}

impl From<Value> for LogMessage {
    fn from(value: Value) -> Self {
        LogMessage::Value(value)
    }
}

impl From<std::io::Error> for LogMessage {
    fn from(err: std::io::Error) -> Self {
        LogMessage::from_error(&err)
    }
}

impl From<&anyhow::Error> for LogMessage {
    fn from(err: &anyhow::Error) -> Self {
        LogMessage::Error {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for LogMessage {
    fn from(err: anyhow::Error) -> Self {
        LogMessage::from(&err)
    }
}
