//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod formatter;
pub mod hook;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use formatter::{FormattedRecord, LineFormatter, TextFormatter};
pub use hook::{Hook, LevelHook, SharedAppender};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
