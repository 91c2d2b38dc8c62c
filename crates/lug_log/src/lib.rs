//! Logging for the Lug engine.
//!
//! Re-exports the [`log`] facade macros so that other crates can log through
//! `lug_log::debug!` and friends, and provides a [`LoggingRegistry`] for
//! keeping named [`HandlerLogger`]s and [`Handler`]s around.

pub mod handler;
pub mod logger;
pub mod registry;

pub use handler::{Handler, MemoryHandler, StderrHandler, format_record};
pub use log::{Level, LevelFilter, Log, debug, error, info, log_enabled, trace, warn};
pub use logger::HandlerLogger;
pub use registry::LoggingRegistry;
