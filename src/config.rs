//! Logger configuration
//!
//! [`LoggerConfig`] carries the five factory parameters plus the discard
//! destination. It can be built fluently or loaded from JSON:
//!
//! ```
//! use rust_logger_factory::LoggerConfig;
//! use std::time::Duration;
//!
//! let config = LoggerConfig::from_json_str(
//!     r#"{ "level": "debug", "log_path": "/var/log/app.log", "roll_time_secs": 3600, "log_count": 24 }"#,
//! ).unwrap();
//! assert_eq!(config.roll_time, Duration::from_secs(3600));
//! assert!(config.is_console);
//! ```

use crate::appenders::discard::NULL_DEVICE;
use crate::appenders::RotationPolicy;
use crate::core::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// Threshold name; unknown names fall back to `info`
    pub level: String,
    /// Stable path of the rotating file set; empty disables file output
    pub log_path: PathBuf,
    /// Rotation window; zero means one day
    #[serde(rename = "roll_time_secs", with = "duration_secs")]
    pub roll_time: Duration,
    /// Rotated files to keep; zero prunes by age instead
    pub log_count: usize,
    /// Write to stdout instead of the discard destination
    pub is_console: bool,
    /// Primary destination when console output is off
    pub discard_path: PathBuf,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_path: PathBuf::new(),
            roll_time: Duration::ZERO,
            log_count: 0,
            is_console: true,
            discard_path: PathBuf::from(NULL_DEVICE),
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_path(mut self, path: impl AsRef<Path>) -> Self {
        self.log_path = path.as_ref().to_path_buf();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn roll_time(mut self, roll_time: Duration) -> Self {
        self.roll_time = roll_time;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_count(mut self, count: usize) -> Self {
        self.log_count = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, is_console: bool) -> Self {
        self.is_console = is_console;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn discard_path(mut self, path: impl AsRef<Path>) -> Self {
        self.discard_path = path.as_ref().to_path_buf();
        self
    }

    /// Whether a rotating file set is requested
    pub fn has_file_output(&self) -> bool {
        !self.log_path.as_os_str().is_empty()
    }

    /// Rotation settings for the file backend
    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::new()
            .with_interval(self.roll_time)
            .with_max_files(self.log_count)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
