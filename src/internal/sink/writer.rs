// src/internal/sink/writer.rs

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Callback invoked for every line the writer could not persist
pub type FailureHandler = Arc<dyn Fn(&WriteFailure) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum WriteFailure {
    #[error("failed to write to log file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("log queue full, dropped line for {}", .path.display())]
    QueueFull { path: PathBuf },
    #[error("log writer unavailable, dropped line for {}: {reason}", .path.display())]
    Unavailable { path: PathBuf, reason: String },
}

impl WriteFailure {
    pub fn path(&self) -> &Path {
        match self {
            WriteFailure::Io { path, .. }
            | WriteFailure::QueueFull { path }
            | WriteFailure::Unavailable { path, .. } => path,
        }
    }
}

/// Reports failures on stderr, keeping them visible to the operator
pub fn default_failure_handler() -> FailureHandler {
    Arc::new(|failure: &WriteFailure| {
        eprintln!("Failed to write to log file: {}", failure);
    })
}

enum Command {
    Append { path: PathBuf, line: String },
    Flush(mpsc::Sender<()>),
}

struct Worker {
    tx: SyncSender<Command>,
    handle: JoinHandle<()>,
}

/// Non-blocking, append-only file writer.
///
/// Lines are queued on a bounded channel and drained by a background thread
/// that is spawned on first use. Callers never wait for the write; failures
/// go to the [`FailureHandler`]. The target file must already exist.
pub struct AppendWriter {
    worker: Mutex<Option<Worker>>,
    capacity: usize,
    on_failure: FailureHandler,
}

impl AppendWriter {
    pub fn new(capacity: usize, on_failure: FailureHandler) -> Self {
        Self {
            worker: Mutex::new(None),
            capacity: capacity.max(1),
            on_failure,
        }
    }

    /// Queue `line` plus the platform line terminator for appending to `path`
    pub fn append_and_forget(&self, path: &Path, line: &str) {
        let mut guard = self.worker.lock().unwrap_or_else(PoisonError::into_inner);

        if guard.is_none() {
            match self.spawn_worker() {
                Ok(worker) => *guard = Some(worker),
                Err(e) => {
                    drop(guard);
                    (self.on_failure)(&WriteFailure::Unavailable {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                    return;
                }
            }
        }

        let command = Command::Append {
            path: path.to_path_buf(),
            line: format!("{}{}", line, LINE_ENDING),
        };

        let sent = guard.as_ref().map(|w| w.tx.try_send(command));
        let failure = match sent {
            Some(Ok(())) | None => return,
            Some(Err(TrySendError::Full(_))) => WriteFailure::QueueFull {
                path: path.to_path_buf(),
            },
            Some(Err(TrySendError::Disconnected(_))) => {
                // Worker is gone; the next call spawns a fresh one
                *guard = None;
                WriteFailure::Unavailable {
                    path: path.to_path_buf(),
                    reason: "writer thread exited".to_string(),
                }
            }
        };
        drop(guard);
        (self.on_failure)(&failure);
    }

    /// Block until every line queued before this call has been written
    pub fn flush(&self) {
        let tx = {
            let guard = self.worker.lock().unwrap_or_else(PoisonError::into_inner);
            match guard.as_ref() {
                Some(worker) => worker.tx.clone(),
                None => return,
            }
        };

        let (done_tx, done_rx) = mpsc::channel();
        if tx.send(Command::Flush(done_tx)).is_ok() {
            let _ = done_rx.recv();
        }
    }

    fn spawn_worker(&self) -> io::Result<Worker> {
        let (tx, rx) = mpsc::sync_channel(self.capacity);
        let on_failure = Arc::clone(&self.on_failure);
        let handle = thread::Builder::new()
            .name("micro-logger-writer".to_string())
            .spawn(move || run(rx, on_failure))?;
        Ok(Worker { tx, handle })
    }
}

impl Drop for AppendWriter {
    fn drop(&mut self) {
        let worker = self
            .worker
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(Worker { tx, handle }) = worker {
            // Closing the channel lets the worker drain and exit
            drop(tx);
            if handle.join().is_err() {
                warn!("log writer thread panicked");
            }
        }
    }
}

fn run(rx: Receiver<Command>, on_failure: FailureHandler) {
    debug!("log writer started");
    for command in rx {
        match command {
            Command::Append { path, line } => {
                if let Err(source) = append_line(&path, &line) {
                    on_failure(&WriteFailure::Io { path, source });
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("log writer stopped");
}

/// Append without creating: a missing file is a write failure
fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(line.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn capturing_handler() -> (FailureHandler, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler: FailureHandler = Arc::new(move |failure: &WriteFailure| {
            sink.lock().unwrap().push(failure.to_string());
        });
        (handler, seen)
    }

    #[test]
    fn appends_lines_in_order_after_flush() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "existing\n").unwrap();

        let (handler, failures) = capturing_handler();
        let writer = AppendWriter::new(16, handler);
        writer.append_and_forget(&path, "first");
        writer.append_and_forget(&path, "second");
        writer.flush();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            format!("existing\nfirst{0}second{0}", LINE_ENDING)
        );
        assert!(failures.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_reported_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let (handler, failures) = capturing_handler();
        let writer = AppendWriter::new(16, handler);
        writer.append_and_forget(&path, "lost");
        writer.flush();

        assert!(!path.exists());
        let failures = failures.lock().unwrap();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("absent.txt"));
    }

    #[test]
    fn flush_without_writes_returns_immediately() {
        let (handler, _) = capturing_handler();
        let writer = AppendWriter::new(1, handler);
        writer.flush();
    }

    #[test]
    fn drop_drains_pending_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        fs::write(&path, "").unwrap();

        let (handler, _) = capturing_handler();
        let writer = AppendWriter::new(64, handler);
        for i in 0..10 {
            writer.append_and_forget(&path, &format!("line {}", i));
        }
        drop(writer);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 10);
    }
}
