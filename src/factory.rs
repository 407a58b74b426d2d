//! Logger construction
//!
//! [`LoggerFactory`] turns a [`LoggerConfig`] into a ready [`Logger`]:
//!
//! 1. the level string is resolved, falling back to `info` with a diagnostic;
//! 2. one [`TextFormatter`] is shared by every sink;
//! 3. the primary output is stdout or the discard destination;
//! 4. a non-empty `log_path` adds a rotating file set behind a hook that
//!    receives every level.
//!
//! Either sink failing to open aborts construction with no logger.

use crate::appenders::{ConsoleAppender, DiscardAppender, RotatingFileAppender};
use crate::config::LoggerConfig;
use crate::core::{
    Appender, LevelHook, LineFormatter, LogLevel, Logger, Result, TextFormatter,
};
use std::fmt;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A non-fatal problem found while building a logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The level string was not recognized and `fallback` was used instead
    UnknownLevel { input: String, fallback: LogLevel },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownLevel { input, fallback } => write!(
                f,
                "invalid log level \"{}\", using default level \"{}\"",
                input, fallback
            ),
        }
    }
}

/// Map a level name to a threshold. Unknown names give `info` plus a diagnostic.
pub fn resolve_level(input: &str) -> (LogLevel, Option<Diagnostic>) {
    match input.parse::<LogLevel>() {
        Ok(level) => (level, None),
        Err(_) => {
            let fallback = LogLevel::default();
            let diagnostic = Diagnostic::UnknownLevel {
                input: input.to_string(),
                fallback,
            };
            (fallback, Some(diagnostic))
        }
    }
}

/// A freshly built logger together with anything worth telling the caller.
///
/// Derefs to [`Logger`].
pub struct ConfiguredLogger {
    logger: Logger,
    diagnostics: Vec<Diagnostic>,
}

impl ConfiguredLogger {
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Log each diagnostic at `warn` through the new logger
    pub fn report_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            self.logger.warn(diagnostic.to_string());
        }
    }

    pub fn into_logger(self) -> Logger {
        self.logger
    }
}

impl Deref for ConfiguredLogger {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        &self.logger
    }
}

/// Builds loggers from a [`LoggerConfig`]
///
/// # Example
///
/// ```
/// use rust_logger_factory::{LoggerConfig, LoggerFactory, LogLevel};
///
/// let built = LoggerFactory::new(LoggerConfig::new().level("debug"))
///     .create()
///     .unwrap();
/// assert_eq!(built.level(), LogLevel::Debug);
/// assert!(!built.has_diagnostics());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerFactory {
    config: LoggerConfig,
}

impl LoggerFactory {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Build a logger.
    ///
    /// # Errors
    ///
    /// - [`LoggerError::SinkInit`] if the discard destination cannot be opened
    /// - [`LoggerError::RotationInit`] if the rotating file set cannot be set up
    ///
    /// [`LoggerError::SinkInit`]: crate::LoggerError::SinkInit
    /// [`LoggerError::RotationInit`]: crate::LoggerError::RotationInit
    pub fn create(&self) -> Result<ConfiguredLogger> {
        let config = &self.config;
        let (level, diagnostic) = resolve_level(&config.level);
        let formatter: Arc<dyn LineFormatter> = Arc::new(TextFormatter::new());

        let output: Box<dyn Appender> = if config.is_console {
            Box::new(ConsoleAppender::new())
        } else {
            Box::new(DiscardAppender::open(&config.discard_path)?)
        };

        let mut builder = Logger::builder()
            .min_level(level)
            .formatter(Arc::clone(&formatter))
            .boxed_output(output);

        if config.has_file_output() {
            let backend = RotatingFileAppender::new(&config.log_path, config.rotation_policy())?;
            builder = builder.hook(LevelHook::all_levels(backend, Arc::clone(&formatter)));
        }

        Ok(ConfiguredLogger {
            logger: builder.build(),
            diagnostics: diagnostic.into_iter().collect(),
        })
    }
}

impl From<LoggerConfig> for LoggerFactory {
    fn from(config: LoggerConfig) -> Self {
        Self::new(config)
    }
}

/// Build a logger from the five classic parameters.
///
/// An empty `log_path` disables file output. `roll_time` of zero rotates daily,
/// `log_count` of zero prunes files older than a week instead of by count.
///
/// # Example
///
/// ```
/// use rust_logger_factory::new_logger;
/// use std::time::Duration;
///
/// let logger = new_logger("warn", "", Duration::ZERO, 0, true).unwrap();
/// logger.warn("disk almost full");
/// ```
pub fn new_logger(
    level: &str,
    log_path: impl AsRef<Path>,
    roll_time: Duration,
    log_count: usize,
    is_console: bool,
) -> Result<ConfiguredLogger> {
    let config = LoggerConfig::new()
        .level(level)
        .log_path(log_path)
        .roll_time(roll_time)
        .log_count(log_count)
        .console(is_console);
    LoggerFactory::new(config).create()
}
