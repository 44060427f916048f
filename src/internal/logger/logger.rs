// src/internal/logger/logger.rs

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::debug;

use super::format::{colorize, compose_entry, local_time_text};
use super::message::LogMessage;
use super::severity::Severity;
use super::LoggerError;
use crate::internal::sink::writer::{default_failure_handler, DEFAULT_QUEUE_CAPACITY};
use crate::internal::sink::{AppendWriter, Console, FailureHandler, StdoutConsole};

/// Options accepted by [`Logger::configure`]
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerOptions {
    /// Duplicate output to the console when a log file is configured
    pub tee: bool,
    /// Severities excluded from all output
    pub suppress: Vec<Severity>,
    /// ANSI colors on console output
    pub color: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            tee: false,
            suppress: Vec::new(),
            color: true,
        }
    }
}

impl LoggerOptions {
    pub fn with_tee(mut self, tee: bool) -> Self {
        self.tee = tee;
        self
    }

    pub fn with_suppress<I>(mut self, severities: I) -> Self
    where
        I: IntoIterator<Item = Severity>,
    {
        self.suppress = severities.into_iter().collect();
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Contents of the last-error slot
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LastError {
    /// No error has been logged and the slot was never reset
    #[default]
    Unset,
    /// Explicitly cleared
    Null,
    Value(LogMessage),
}

impl LastError {
    pub fn is_unset(&self) -> bool {
        matches!(self, LastError::Unset)
    }

    pub fn message(&self) -> Option<&LogMessage> {
        match self {
            LastError::Value(message) => Some(message),
            _ => None,
        }
    }
}

struct Settings {
    path: Option<PathBuf>,
    tee: bool,
    suppressed: HashSet<Severity>,
    color: bool,
    initialized: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: None,
            tee: false,
            suppressed: HashSet::new(),
            color: true,
            initialized: false,
        }
    }
}

impl Settings {
    /// A logger without a file always writes to the console
    fn console_enabled(&self) -> bool {
        !self.initialized || self.tee || self.path.is_none()
    }
}

/// Builder for a [`Logger`] with non-default collaborators
pub struct LoggerBuilder {
    console: Arc<dyn Console>,
    on_failure: FailureHandler,
    queue_capacity: usize,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            console: Arc::new(StdoutConsole),
            on_failure: default_failure_handler(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl LoggerBuilder {
    pub fn console<C: Console + 'static>(mut self, console: C) -> Self {
        self.console = Arc::new(console);
        self
    }

    /// Called for every line the file sink fails to persist
    pub fn on_write_failure(mut self, handler: FailureHandler) -> Self {
        self.on_failure = handler;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            settings: RwLock::new(Settings::default()),
            last_error: Mutex::new(LastError::Unset),
            console: self.console,
            writer: AppendWriter::new(self.queue_capacity, self.on_failure),
        }
    }
}

/// Routes tagged messages to a log file and/or the console
pub struct Logger {
    settings: RwLock<Settings>,
    last_error: Mutex<LastError>,
    console: Arc<dyn Console>,
    writer: AppendWriter,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Console-only logger writing to stdout until configured
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Apply configuration, replacing any previous one.
    ///
    /// An empty `path` means no file sink. A missing log file is created
    /// together with its parent directories; on failure the previous
    /// configuration stays in place.
    pub fn configure(&self, path: impl AsRef<Path>, options: LoggerOptions) -> Result<(), LoggerError> {
        let path = path.as_ref();
        let path = if path.as_os_str().is_empty() {
            None
        } else {
            ensure_log_file(path)?;
            Some(path.to_path_buf())
        };

        debug!(
            path = ?path,
            tee = options.tee,
            suppress = ?options.suppress,
            "logger configured"
        );

        let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        *settings = Settings {
            path,
            tee: options.tee,
            suppressed: options.suppress.into_iter().collect(),
            color: options.color,
            initialized: true,
        };
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.read_settings(|s| s.initialized)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.read_settings(|s| s.path.clone())
    }

    pub fn is_suppressed(&self, severity: Severity) -> bool {
        self.read_settings(|s| s.suppressed.contains(&severity))
    }

    /// Log at an arbitrary severity. `Error` updates the last-error slot and
    /// `Text` ignores the sender.
    pub fn log(&self, severity: Severity, message: impl Into<LogMessage>, sender: Option<&str>) {
        match severity {
            Severity::Error => self.error(message, sender),
            Severity::Text => self.text(message),
            _ => self.dispatch(severity, &message.into(), sender),
        }
    }

    /// Log an error. The last-error slot is updated even when errors are suppressed.
    pub fn error(&self, message: impl Into<LogMessage>, sender: Option<&str>) {
        let message = message.into();
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) =
            LastError::Value(message.clone());
        self.dispatch(Severity::Error, &message, sender);
    }

    pub fn debug(&self, message: impl Into<LogMessage>, sender: Option<&str>) {
        self.dispatch(Severity::Debug, &message.into(), sender);
    }

    pub fn warning(&self, message: impl Into<LogMessage>, sender: Option<&str>) {
        self.dispatch(Severity::Warning, &message.into(), sender);
    }

    pub fn info(&self, message: impl Into<LogMessage>, sender: Option<&str>) {
        self.dispatch(Severity::Info, &message.into(), sender);
    }

    pub fn success(&self, message: impl Into<LogMessage>, sender: Option<&str>) {
        self.dispatch(Severity::Success, &message.into(), sender);
    }

    /// Raw pass-through: no timestamp, label, sender or color code
    pub fn text(&self, message: impl Into<LogMessage>) {
        self.dispatch(Severity::Text, &message.into(), None);
    }

    pub fn last_error(&self) -> LastError {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrite the last-error slot. `None` stores [`LastError::Null`].
    pub fn reset_last_error(&self, value: Option<LogMessage>) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = match value {
            Some(message) => LastError::Value(message),
            None => LastError::Null,
        };
    }

    /// Wait for queued file writes to settle
    pub fn flush(&self) {
        self.writer.flush();
    }

    fn dispatch(&self, severity: Severity, message: &LogMessage, sender: Option<&str>) {
        let (path, to_console, color) = {
            let settings = self.settings.read().unwrap_or_else(PoisonError::into_inner);
            if settings.suppressed.contains(&severity) {
                return;
            }
            let path = if settings.initialized {
                settings.path.clone()
            } else {
                None
            };
            (path, settings.console_enabled(), settings.color)
        };

        let body = message.render();
        let text = if severity.is_formatted() {
            compose_entry(severity, &local_time_text(), sender, &body)
        } else {
            body
        };

        if let Some(path) = path {
            self.writer.append_and_forget(&path, &text);
        }

        if to_console {
            if let Err(e) = self.console.write_line(&colorize(severity, &text, color)) {
                debug!(error = %e, "console write failed");
            }
        }
    }

    fn read_settings<T>(&self, f: impl FnOnce(&Settings) -> T) -> T {
        f(&self.settings.read().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Create the parent directory and an empty file when nothing exists at `path`
fn ensure_log_file(path: &Path) -> Result<(), LoggerError> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LoggerError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggerError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}
