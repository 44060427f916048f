use std::io;
use std::sync::{Arc, Mutex};

use super::Console;

/// In-memory console for testing - captures every line written
#[derive(Clone, Default)]
pub struct MemoryConsole {
    /// Captured lines, escape sequences included
    pub lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured lines
    pub fn get_lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

impl Console for MemoryConsole {
    fn write_line(&self, text: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
