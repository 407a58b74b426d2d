//! Main logger implementation

use super::{
    appender::Appender,
    error::Result,
    formatter::{LineFormatter, TextFormatter},
    hook::Hook,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::appenders::ConsoleAppender;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A leveled logger with one primary output and any number of hooks.
///
/// The handle is `Send + Sync`; share it behind an `Arc`. Every record is
/// formatted once and written as a whole line to each sink under that sink's
/// lock, so lines from concurrent callers never interleave.
pub struct Logger {
    min_level: RwLock<LogLevel>,
    formatter: Arc<dyn LineFormatter>,
    output: Mutex<Option<Box<dyn Appender>>>,
    hooks: RwLock<Vec<Box<dyn Hook>>>,
    metrics: LoggerMetrics,
    closed: AtomicBool,
}

impl Logger {
    /// Logger at `info` writing the fixed text format to stdout
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Run a sink operation, turning both errors and panics into a reported failure
    fn isolated(kind: &str, name: &str, op: impl FnOnce() -> Result<()>) -> bool {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(op)) {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] {} '{}' failed: {}", kind, name, e);
                false
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                eprintln!(
                    "[LOGGER CRITICAL] {} '{}' panicked: {}. Other sinks continue to function.",
                    kind, name, panic_msg
                );
                false
            }
        }
    }

    fn dispatch(&self, entry: &LogEntry) {
        let line = self.formatter.format(entry);
        let mut ok = true;

        if let Some(output) = self.output.lock().as_mut() {
            let name = output.name().to_string();
            ok &= Self::isolated("Output", &name, || output.write(entry.level, &line));
        }

        for hook in self.hooks.read().iter() {
            if hook.levels().contains(&entry.level) {
                ok &= Self::isolated("Hook", hook.name(), || hook.fire(entry));
            }
        }

        if ok {
            self.metrics.record_logged();
        } else {
            self.metrics.record_dropped();
        }
    }

    /// Effective threshold
    pub fn level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    /// Whether a record at `level` would currently be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        !self.is_closed() && level >= self.level()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Name of the primary output, `None` once closed
    pub fn output_name(&self) -> Option<String> {
        self.output.lock().as_ref().map(|o| o.name().to_string())
    }

    pub fn add_hook(&self, hook: Box<dyn Hook>) {
        self.hooks.write().push(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }

    /// The formatter shared by the output and the hooks the factory installs
    pub fn formatter(&self) -> Arc<dyn LineFormatter> {
        Arc::clone(&self.formatter)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }

        let entry = LogEntry::new(level, message);
        self.dispatch(&entry);
    }

    #[inline]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Log at `fatal`. The process keeps running; exiting is the caller's call.
    #[inline]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Log at the panic tier, then panic with the same message
    pub fn panic(&self, message: impl AsRef<str>) -> ! {
        let message = message.as_ref();
        self.log(LogLevel::Panic, message);
        panic!("{}", message);
    }

    /// Flush the output and every hook. All sinks are flushed even if one
    /// fails; the first error is returned.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        if let Some(output) = self.output.lock().as_mut() {
            if let Err(e) = output.flush() {
                first_error.get_or_insert(e);
            }
        }
        for hook in self.hooks.read().iter() {
            if let Err(e) = hook.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Flush and release every sink.
    ///
    /// Later log calls are ignored. Closing twice is a no-op. Every sink is
    /// flushed even if an earlier one fails; the first error is returned.
    pub fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        let output = self.output.lock().take();
        let hooks = std::mem::take(&mut *self.hooks.write());

        let mut first_error = None;
        if let Some(mut output) = output {
            if let Err(e) = output.flush() {
                first_error.get_or_insert(e);
            }
        }
        for hook in &hooks {
            if let Err(e) = hook.flush() {
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logger_factory::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .output(ConsoleAppender::new())
///     .build();
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    formatter: Arc<dyn LineFormatter>,
    output: Option<Box<dyn Appender>>,
    hooks: Vec<Box<dyn Hook>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            formatter: Arc::new(TextFormatter),
            output: None,
            hooks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<dyn LineFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the primary output. Defaults to stdout.
    #[must_use = "builder methods return a new value"]
    pub fn output<A: Appender + 'static>(self, output: A) -> Self {
        self.boxed_output(Box::new(output))
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_output(mut self, output: Box<dyn Appender>) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn hook<H: Hook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn build(self) -> Logger {
        let output = self
            .output
            .unwrap_or_else(|| Box::new(ConsoleAppender::new()));

        Logger {
            min_level: RwLock::new(self.min_level),
            formatter: self.formatter,
            output: Mutex::new(Some(output)),
            hooks: RwLock::new(self.hooks),
            metrics: LoggerMetrics::new(),
            closed: AtomicBool::new(false),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formatter::FormattedRecord;
    use crate::core::hook::LevelHook;
    use crate::core::LoggerError;

    #[derive(Clone, Default)]
    struct Memory {
        lines: Arc<Mutex<Vec<String>>>,
        flushed: Arc<AtomicBool>,
    }

    impl Appender for Memory {
        fn write(&mut self, _level: LogLevel, formatted: &[u8]) -> Result<()> {
            self.lines
                .lock()
                .push(String::from_utf8_lossy(formatted).into_owned());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushed.store(true, Ordering::Release);
            Ok(())
        }

        fn name(&self) -> &str {
            "memory"
        }
    }

    struct Failing;

    impl Appender for Failing {
        fn write(&mut self, _level: LogLevel, _formatted: &[u8]) -> Result<()> {
            Err(LoggerError::other("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Err(LoggerError::other("Simulated flush failure"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.output_name().as_deref(), Some("console"));
        assert_eq!(logger.hook_count(), 0);
    }

    #[test]
    fn test_threshold_filters() {
        let memory = Memory::default();
        let logger = Logger::builder()
            .min_level(LogLevel::Warn)
            .output(memory.clone())
            .build();

        logger.trace("t");
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");
        logger.fatal("f");

        let lines = memory.lines.lock();
        assert_eq!(lines.len(), 3);
        assert_eq!(logger.metrics().filtered_count(), 3);
        assert_eq!(logger.metrics().total_logged(), 3);
    }

    #[test]
    fn test_set_level_at_runtime() {
        let memory = Memory::default();
        let logger = Logger::builder().output(memory.clone()).build();

        logger.debug("hidden");
        logger.set_level(LogLevel::Debug);
        logger.debug("shown");

        let lines = memory.lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("shown\n"));
    }

    #[test]
    fn test_output_and_hook_lines_identical() {
        let output = Memory::default();
        let mirrored = Memory::default();
        let logger = Logger::builder().output(output.clone()).build();
        logger.add_hook(Box::new(LevelHook::all_levels(
            mirrored.clone(),
            logger.formatter(),
        )));

        logger.error("same bytes everywhere");

        assert_eq!(*output.lines.lock(), *mirrored.lines.lock());
        let record = FormattedRecord::parse(&output.lines.lock()[0]).unwrap();
        assert_eq!(record.level, LogLevel::Error);
    }

    #[test]
    fn test_failing_sink_counts_dropped() {
        let healthy = Memory::default();
        let logger = Logger::builder().output(Failing).build();
        logger.add_hook(Box::new(LevelHook::all_levels(
            healthy.clone(),
            logger.formatter(),
        )));

        for _ in 0..5 {
            logger.info("Test message");
        }

        assert_eq!(logger.dropped_count(), 5);
        // the hook still received every record
        assert_eq!(healthy.lines.lock().len(), 5);
    }

    #[test]
    fn test_flush_reaches_hooks_after_output_fails() {
        let first = Memory::default();
        let second = Memory::default();
        let logger = Logger::builder().output(Failing).build();
        logger.add_hook(Box::new(LevelHook::all_levels(first.clone(), logger.formatter())));
        logger.add_hook(Box::new(LevelHook::all_levels(second.clone(), logger.formatter())));

        let result = logger.flush();

        assert!(matches!(result, Err(LoggerError::Other(ref m)) if m == "Simulated flush failure"));
        assert!(first.flushed.load(Ordering::Acquire));
        assert!(second.flushed.load(Ordering::Acquire));
    }

    #[test]
    fn test_close_flushes_and_silences() {
        let memory = Memory::default();
        let logger = Logger::builder().output(memory.clone()).build();

        logger.info("before");
        logger.close().unwrap();
        logger.info("after");

        assert!(memory.flushed.load(Ordering::Acquire));
        assert!(logger.is_closed());
        assert_eq!(logger.output_name(), None);
        assert_eq!(memory.lines.lock().len(), 1);
        assert!(!logger.is_enabled(LogLevel::Fatal));

        // second close is a no-op
        logger.close().unwrap();
    }

    #[test]
    fn test_panic_logs_then_panics() {
        let memory = Memory::default();
        let logger = Logger::builder()
            .min_level(LogLevel::Fatal)
            .output(memory.clone())
            .build();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("unrecoverable");
        }));

        assert!(result.is_err());
        let lines = memory.lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[panic ]  unrecoverable"));
    }
}
