//! Registry of named loggers and handlers.

use crate::handler::Handler;
use log::Log;
use std::{collections::HashMap, fmt, sync::Arc};

/// Owns loggers and handlers and makes them available by name.
///
/// The registry is an ordinary value: create one where logging is set up
/// and pass it to whatever needs to look up loggers or handlers.
#[derive(Default)]
pub struct LoggingRegistry {
    loggers: HashMap<String, Box<dyn Log>>,
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl LoggingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of the given logger and registers it under the given
    /// name. If a logger was already registered under the name, it is replaced
    /// and returned.
    pub fn register_logger(
        &mut self,
        name: impl Into<String>,
        logger: Box<dyn Log>,
    ) -> Option<Box<dyn Log>> {
        let name = name.into();
        crate::debug!("Registering logger {name}");
        self.loggers.insert(name, logger)
    }

    /// Returns the logger registered under the given name, or [`None`] if
    /// there is no such logger.
    pub fn logger(&self, name: &str) -> Option<&dyn Log> {
        self.loggers.get(name).map(Box::as_ref)
    }

    /// Registers the given handler under the given name. If a handler was
    /// already registered under the name, it is replaced and returned.
    pub fn register_handler(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> Option<Arc<dyn Handler>> {
        let name = name.into();
        crate::debug!("Registering handler {name}");
        self.handlers.insert(name, handler)
    }

    /// Returns the handler registered under the given name, or [`None`] if
    /// there is no such handler.
    pub fn handler(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    pub fn n_loggers(&self) -> usize {
        self.loggers.len()
    }

    pub fn n_handlers(&self) -> usize {
        self.handlers.len()
    }

    /// Removes all registered loggers and handlers.
    pub fn clear(&mut self) {
        for logger in self.loggers.values() {
            logger.flush();
        }
        self.loggers.clear();
        self.handlers.clear();
    }
}

impl fmt::Debug for LoggingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingRegistry")
            .field("loggers", &self.loggers.keys().collect::<Vec<_>>())
            .field("handlers", &self.handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handler::{MemoryHandler, StderrHandler},
        logger::HandlerLogger,
    };
    use log::{Level, LevelFilter, Record};

    #[test]
    fn new_registry_is_empty() {
        let registry = LoggingRegistry::new();
        assert_eq!(registry.n_loggers(), 0);
        assert_eq!(registry.n_handlers(), 0);
        assert!(registry.logger("core").is_none());
        assert!(registry.handler("memory").is_none());
    }

    #[test]
    fn registered_logger_can_be_looked_up_by_name() {
        let mut registry = LoggingRegistry::new();
        let replaced = registry.register_logger(
            "core",
            Box::new(HandlerLogger::new("core", LevelFilter::Info)),
        );
        assert!(replaced.is_none());
        assert_eq!(registry.n_loggers(), 1);

        let logger = registry.logger("core").unwrap();
        let metadata = log::Metadata::builder().level(Level::Info).build();
        assert!(logger.enabled(&metadata));
        assert!(registry.logger("other").is_none());
    }

    #[test]
    fn registering_logger_under_taken_name_replaces_it() {
        let mut registry = LoggingRegistry::new();
        registry.register_logger(
            "core",
            Box::new(HandlerLogger::new("core", LevelFilter::Error)),
        );
        let replaced = registry.register_logger(
            "core",
            Box::new(HandlerLogger::new("core", LevelFilter::Trace)),
        );

        assert!(replaced.is_some());
        assert_eq!(registry.n_loggers(), 1);

        let metadata = log::Metadata::builder().level(Level::Trace).build();
        assert!(registry.logger("core").unwrap().enabled(&metadata));
    }

    #[test]
    fn registered_handler_is_shared_with_loggers() {
        let memory = Arc::new(MemoryHandler::new());
        let mut registry = LoggingRegistry::new();
        registry.register_handler("memory", memory.clone());

        let handler = registry.handler("memory").unwrap();
        registry.register_logger(
            "core",
            Box::new(HandlerLogger::new("core", LevelFilter::Info).with_handler(handler)),
        );

        registry.logger("core").unwrap().log(
            &Record::builder()
                .level(Level::Info)
                .target("core")
                .args(format_args!("started"))
                .build(),
        );

        assert_eq!(memory.lines(), vec!["[INFO core] started".to_string()]);
    }

    #[test]
    fn registering_handler_under_taken_name_replaces_it() {
        let mut registry = LoggingRegistry::new();
        assert!(
            registry
                .register_handler("out", Arc::new(MemoryHandler::new()))
                .is_none()
        );
        assert!(
            registry
                .register_handler("out", Arc::new(StderrHandler))
                .is_some()
        );
        assert_eq!(registry.n_handlers(), 1);
    }

    #[test]
    fn clearing_registry_removes_everything() {
        let mut registry = LoggingRegistry::new();
        registry.register_handler("memory", Arc::new(MemoryHandler::new()));
        registry.register_logger(
            "core",
            Box::new(HandlerLogger::new("core", LevelFilter::Info)),
        );

        registry.clear();

        assert_eq!(registry.n_loggers(), 0);
        assert_eq!(registry.n_handlers(), 0);
        assert!(registry.logger("core").is_none());
        assert!(registry.handler("memory").is_none());
    }
}
