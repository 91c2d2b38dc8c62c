//! Loggers dispatching to handlers.

use crate::handler::Handler;
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::Arc;

/// A [`Log`] implementation that forwards every record at or above its level
/// to all of its handlers.
#[derive(Debug)]
pub struct HandlerLogger {
    name: String,
    level: LevelFilter,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerLogger {
    /// Creates a logger with the given name that lets through records up to
    /// the given level of verbosity. The logger has no handlers initially.
    pub fn new(name: impl Into<String>, level: LevelFilter) -> Self {
        Self {
            name: name.into(),
            level,
            handlers: Vec::new(),
        }
    }

    /// Returns the logger with the given handler appended.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.add_handler(handler);
        self
    }

    pub fn add_handler(&mut self, handler: Arc<dyn Handler>) {
        self.handlers.push(handler);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn n_handlers(&self) -> usize {
        self.handlers.len()
    }
}

impl Log for HandlerLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        for handler in &self.handlers {
            handler.handle(record);
        }
    }

    fn flush(&self) {
        for handler in &self.handlers {
            handler.flush();
        }
    }
}
