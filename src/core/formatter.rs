//! Fixed text line format
//!
//! Every sink receives lines of the form
//!
//! ```text
//! [2025-01-08 10:30:45.123]  [info  ]  Request processed
//! ```
//!
//! The timestamp is local time with millisecond precision (23 characters),
//! the level label is padded or truncated to 6 characters.

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// strftime pattern of the timestamp field
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Width of the timestamp field
pub const TIMESTAMP_WIDTH: usize = 23;

/// Width of the level field
pub const LEVEL_WIDTH: usize = 6;

/// Turns a [`LogEntry`] into the bytes written to a sink.
pub trait LineFormatter: Send + Sync {
    fn format(&self, entry: &LogEntry) -> Vec<u8>;
}

/// The one formatter used by loggers built by the factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render a timestamp the way it appears in the timestamp field
    #[must_use]
    pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Parse a timestamp field back into local time
    pub fn parse_timestamp(field: &str) -> Result<DateTime<Local>> {
        let naive = NaiveDateTime::parse_from_str(field.trim_end(), TIMESTAMP_FORMAT)
            .map_err(|e| LoggerError::other(format!("Invalid timestamp '{}': {}", field, e)))?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| LoggerError::other(format!("Nonexistent local time '{}'", field)))
    }
}

impl LineFormatter for TextFormatter {
    fn format(&self, entry: &LogEntry) -> Vec<u8> {
        format!(
            "[{:<tw$}]  [{:<lw$.lw$}]  {}\n",
            Self::format_timestamp(&entry.timestamp),
            entry.level,
            entry.message,
            tw = TIMESTAMP_WIDTH,
            lw = LEVEL_WIDTH,
        )
        .into_bytes()
    }
}

/// One emitted line, split back into its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedRecord {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl FormattedRecord {
    /// Parse a line produced by [`TextFormatter`]. The trailing newline is optional.
    pub fn parse(line: &str) -> Result<Self> {
        let malformed = || LoggerError::other(format!("Malformed log line: {:?}", line));

        let line = line.strip_suffix('\n').unwrap_or(line);
        let rest = line.strip_prefix('[').ok_or_else(malformed)?;
        let ts_field = rest.get(..TIMESTAMP_WIDTH).ok_or_else(malformed)?;
        let rest = rest[TIMESTAMP_WIDTH..]
            .strip_prefix("]  [")
            .ok_or_else(malformed)?;
        let level_field = rest.get(..LEVEL_WIDTH).ok_or_else(malformed)?;
        let message = rest[LEVEL_WIDTH..]
            .strip_prefix("]  ")
            .ok_or_else(malformed)?;

        let label = level_field.trim_end();
        let level = LogLevel::ALL
            .into_iter()
            .find(|level| level.to_str() == label)
            .ok_or_else(malformed)?;

        Ok(Self {
            timestamp: TextFormatter::parse_timestamp(ts_field)?,
            level,
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_datetime() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .earliest()
            .expect("valid datetime")
            + chrono::Duration::milliseconds(7)
    }

    #[test]
    fn test_exact_line_layout() {
        let entry = LogEntry::at(LogLevel::Info, "Request processed", fixed_datetime());
        let line = String::from_utf8(TextFormatter.format(&entry)).unwrap();
        assert_eq!(line, "[2025-01-08 10:30:45.007]  [info  ]  Request processed\n");
    }

    #[test]
    fn test_every_label_fits_width() {
        for level in LogLevel::ALL {
            let entry = LogEntry::at(level, "m", fixed_datetime());
            let line = String::from_utf8(TextFormatter.format(&entry)).unwrap();
            assert_eq!(&line[24..28], "]  [");
            assert_eq!(&line[34..37], "]  ");
        }
    }

    #[test]
    fn test_zero_millis_keep_width() {
        let ts = Local
            .with_ymd_and_hms(2025, 6, 1, 0, 0, 0)
            .earliest()
            .unwrap();
        assert_eq!(TextFormatter::format_timestamp(&ts), "2025-06-01 00:00:00.000");
    }

    #[test]
    fn test_parse_round_trip() {
        let entry = LogEntry::at(LogLevel::Warn, "disk  almost full ]  [", fixed_datetime());
        let line = String::from_utf8(TextFormatter.format(&entry)).unwrap();
        let record = FormattedRecord::parse(&line).unwrap();
        assert_eq!(record.timestamp, entry.timestamp);
        assert_eq!(record.level, LogLevel::Warn);
        assert_eq!(record.message, entry.message);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(FormattedRecord::parse("").is_err());
        assert!(FormattedRecord::parse("hello world").is_err());
        assert!(FormattedRecord::parse("[2025-01-08 10:30:45.007]  [nope  ]  x").is_err());
        assert!(FormattedRecord::parse("[2025-13-08 10:30:45.007]  [info  ]  x").is_err());
    }
}
