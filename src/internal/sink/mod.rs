use std::io::{self, Write};

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod writer;

pub use writer::{AppendWriter, FailureHandler, WriteFailure};

/// Console abstraction for the synchronous output stream
pub trait Console: Send + Sync {
    /// Write one already formatted line, terminator included by the implementation
    fn write_line(&self, text: &str) -> io::Result<()>;
}

/// Console writing to the process stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write_line(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()
    }
}
