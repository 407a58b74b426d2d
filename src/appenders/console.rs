//! Console appender implementation

use crate::core::{Appender, LogLevel, Result};
use std::io::{self, Write};

/// Writes every line to standard output.
///
/// Any `Write` target can stand in for stdout via [`ConsoleAppender::with_writer`].
pub struct ConsoleAppender {
    target: Option<Box<dyn Write + Send + Sync>>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { target: None }
    }

    /// Write to `target` instead of stdout
    pub fn with_writer<W: Write + Send + Sync + 'static>(target: W) -> Self {
        Self {
            target: Some(Box::new(target)),
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn write(&mut self, _level: LogLevel, formatted: &[u8]) -> Result<()> {
        match self.target.as_mut() {
            Some(target) => target.write_all(formatted)?,
            None => io::stdout().lock().write_all(formatted)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target.as_mut() {
            Some(target) => target.flush()?,
            None => io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_bytes_verbatim() {
        let buf = SharedBuf::default();
        let mut appender = ConsoleAppender::with_writer(buf.clone());

        appender.write(LogLevel::Info, b"first\n").unwrap();
        appender.write(LogLevel::Error, b"second\n").unwrap();
        appender.flush().unwrap();

        assert_eq!(&*buf.0.lock(), b"first\nsecond\n");
        assert_eq!(appender.name(), "console");
    }

    #[test]
    fn test_stdout_write_succeeds() {
        let mut appender = ConsoleAppender::new();
        appender.write(LogLevel::Info, b"").unwrap();
        appender.flush().unwrap();
    }
}
