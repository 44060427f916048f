// src/internal/logger/mod.rs

pub mod format;
pub mod global;
pub mod logger;
pub mod message;
pub mod severity;

use std::io;
use std::path::PathBuf;

pub use global::{
    configure, flush, get_last_error, log_debug, log_error, log_info, log_success, log_text,
    log_warning, reset_last_error, FlushGuard,
};
pub use logger::{LastError, Logger, LoggerBuilder, LoggerOptions};
pub use message::LogMessage;
pub use severity::{ParseSeverityError, Severity};

/// Configuration-time failures. Write-time failures never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create log file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
