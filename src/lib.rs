//! # Rust Logger Factory
//!
//! Builds ready-to-use leveled loggers from a small configuration: a level
//! name, an optional rotating file path, a rotation interval, a retained file
//! count and a console switch.
//!
//! ## Features
//!
//! - **Fixed line format**: `[timestamp]  [level ]  message`, identical on every sink
//! - **Lenient levels**: unknown level names fall back to `info` with a diagnostic
//! - **Rotating files**: time-windowed files, a stable link, count or age pruning
//! - **Thread safe**: one handle shared across threads, explicit `close`
//!
//! ```no_run
//! use rust_logger_factory::new_logger;
//! use std::time::Duration;
//!
//! let logger = new_logger("debug", "/var/log/app.log", Duration::from_secs(3600), 24, true)?;
//! logger.report_diagnostics();
//! logger.info("service started");
//! logger.close()?;
//! # Ok::<(), rust_logger_factory::LoggerError>(())
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod factory;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, DiscardAppender, RotatingFileAppender};
    pub use crate::config::LoggerConfig;
    pub use crate::core::{
        Appender, FormattedRecord, Hook, LevelHook, LineFormatter, LogEntry, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, Result, TextFormatter,
    };
    pub use crate::factory::{
        new_logger, resolve_level, ConfiguredLogger, Diagnostic, LoggerFactory,
    };
}

pub use appenders::{ConsoleAppender, DiscardAppender, RotatingFileAppender};
pub use config::LoggerConfig;
pub use core::{
    Appender, FormattedRecord, Hook, LevelHook, LineFormatter, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerError, LoggerMetrics, Result, TextFormatter,
};
pub use factory::{new_logger, resolve_level, ConfiguredLogger, Diagnostic, LoggerFactory};
