//! Secondary dispatch paths attached to a logger
//!
//! A hook mirrors qualifying records to an additional sink independently of
//! the logger's primary output.

use super::appender::Appender;
use super::error::Result;
use super::formatter::LineFormatter;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// An appender that several level slots may share
pub type SharedAppender = Arc<Mutex<Box<dyn Appender>>>;

pub trait Hook: Send + Sync {
    /// Levels this hook wants to see
    fn levels(&self) -> &[LogLevel];
    fn fire(&self, entry: &LogEntry) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Routes each level to its own appender, formatting with a shared formatter.
///
/// # Example
///
/// ```no_run
/// use rust_logger_factory::appenders::{RotatingFileAppender, RotationPolicy};
/// use rust_logger_factory::core::{LevelHook, TextFormatter};
/// use std::sync::Arc;
///
/// let appender = RotatingFileAppender::new("/var/log/app.log", RotationPolicy::default()).unwrap();
/// let hook = LevelHook::all_levels(appender, Arc::new(TextFormatter));
/// ```
pub struct LevelHook {
    writers: HashMap<LogLevel, SharedAppender>,
    levels: Vec<LogLevel>,
    /// Distinct appenders, for flushing each once
    distinct: Vec<SharedAppender>,
    formatter: Arc<dyn LineFormatter>,
}

impl LevelHook {
    pub fn new(formatter: Arc<dyn LineFormatter>) -> Self {
        Self {
            writers: HashMap::new(),
            levels: Vec::new(),
            distinct: Vec::new(),
            formatter,
        }
    }

    /// Route every level, panic tier included, to one appender
    pub fn all_levels<A: Appender + 'static>(appender: A, formatter: Arc<dyn LineFormatter>) -> Self {
        let shared: SharedAppender = Arc::new(Mutex::new(Box::new(appender)));
        LogLevel::ALL
            .into_iter()
            .fold(Self::new(formatter), |hook, level| {
                hook.with_writer(level, Arc::clone(&shared))
            })
    }

    /// Route `level` to `appender`, replacing any earlier route for it
    #[must_use = "builder methods return a new value"]
    pub fn with_writer(mut self, level: LogLevel, appender: SharedAppender) -> Self {
        if !self.distinct.iter().any(|a| Arc::ptr_eq(a, &appender)) {
            self.distinct.push(Arc::clone(&appender));
        }
        if self.writers.insert(level, appender).is_none() {
            self.levels.push(level);
            self.levels.sort();
        }
        self
    }
}

impl Hook for LevelHook {
    fn levels(&self) -> &[LogLevel] {
        &self.levels
    }

    fn fire(&self, entry: &LogEntry) -> Result<()> {
        let Some(appender) = self.writers.get(&entry.level) else {
            return Ok(());
        };
        let line = self.formatter.format(entry);
        appender.lock().write(entry.level, &line)
    }

    fn flush(&self) -> Result<()> {
        for appender in &self.distinct {
            appender.lock().flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "level_hook"
    }
}
