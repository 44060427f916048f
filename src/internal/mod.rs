pub mod config;
pub mod diagnostics;
pub mod logger;
pub mod sink;
