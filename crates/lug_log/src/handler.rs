//! Handlers receiving the records emitted by loggers.

use parking_lot::Mutex;
use std::{
    fmt,
    io::{self, Write},
};

/// Destination for log records forwarded by a
/// [`HandlerLogger`](crate::HandlerLogger).
pub trait Handler: fmt::Debug + Send + Sync {
    /// Processes the given record.
    fn handle(&self, record: &log::Record<'_>);

    /// Flushes any buffered records.
    fn flush(&self) {}
}

/// Handler that keeps every formatted record in memory.
#[derive(Debug, Default)]
pub struct MemoryHandler {
    lines: Mutex<Vec<String>>,
}

/// Handler that writes formatted records to standard error.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrHandler;

/// Formats the given record as `[LEVEL target] message`.
pub fn format_record(record: &log::Record<'_>) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all lines handled so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn n_lines(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Handler for MemoryHandler {
    fn handle(&self, record: &log::Record<'_>) {
        self.lines.lock().push(format_record(record));
    }
}

impl Handler for StderrHandler {
    fn handle(&self, record: &log::Record<'_>) {
        // A failing stderr has nowhere left to report to
        let _ = writeln!(io::stderr().lock(), "{}", format_record(record));
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
