pub mod cli;
pub mod internal;

// Re-export commonly used types
pub use internal::config::config;
pub use internal::logger::global::{global, FlushGuard};
pub use internal::logger::{
    configure, flush, get_last_error, log_debug, log_error, log_info, log_success, log_text,
    log_warning, reset_last_error,
};
pub use internal::logger::{
    LastError, LogMessage, Logger, LoggerBuilder, LoggerError, LoggerOptions, Severity,
};
pub use internal::sink::{Console, FailureHandler, StdoutConsole, WriteFailure};
