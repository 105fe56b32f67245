//! Best-effort error log for server-side lookup failures.
//!
//! Separate from tracing output: operators read this file to find out why a
//! caller got "check logs". Writes never fail from the caller's point of view.

use chrono::{Local, NaiveTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default location of the error log.
pub const DEFAULT_ERROR_LOG: &str = "/var/log/sha256-check.log";

/// Sink for server-side failure messages.
pub trait ErrorLog: Send + Sync {
    /// Record one message. Must not panic or report failure.
    fn record(&self, message: &str);
}

/// One log line: `HH:MM:SS: <message>\n`.
pub fn format_entry(time: NaiveTime, message: &str) -> String {
    format!("{}: {}\n", time.format("%H:%M:%S"), message)
}

/// Appends to a file, opening it (append + create) on every call so several
/// processes can share it.
#[derive(Debug, Clone)]
pub struct AppendFileLog {
    path: PathBuf,
}

impl AppendFileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ErrorLog for AppendFileLog {
    fn record(&self, message: &str) {
        let entry = format_entry(Local::now().time(), message);
        let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        else {
            return;
        };
        let _ = file.write_all(entry.as_bytes());
    }
}

/// Keeps messages in memory (tests, embedding).
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ErrorLog for MemoryLog {
    fn record(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_string());
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLog;

impl ErrorLog for NullLog {
    fn record(&self, _message: &str) {}
}
