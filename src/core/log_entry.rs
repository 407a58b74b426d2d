//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so that every record stays on exactly one output line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self::at(level, message, Local::now())
    }

    /// Build an entry with an explicit timestamp.
    pub fn at(level: LogLevel, message: impl AsRef<str>, timestamp: DateTime<Local>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitizes_control_characters() {
        let entry = LogEntry::new(LogLevel::Info, "a\nb\rc\td");
        assert_eq!(entry.message, "a\\nb\\rc\\td");
    }

    #[test]
    fn test_timestamp_is_now() {
        let before = Local::now();
        let entry = LogEntry::new(LogLevel::Debug, "x");
        let after = Local::now();
        assert!(entry.timestamp >= before && entry.timestamp <= after);
    }
}
