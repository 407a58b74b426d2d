//! Appender trait for log output destinations

use super::{error::Result, log_level::LogLevel};

/// A sink that accepts already formatted lines.
///
/// Implementations receive the complete line for one record, newline included,
/// and must write it in a single call so lines never interleave.
pub trait Appender: Send + Sync {
    fn write(&mut self, level: LogLevel, formatted: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
