//! Discard appender: output goes to the platform null device

use crate::core::{Appender, LogLevel, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path of the platform's null device
#[cfg(unix)]
pub const NULL_DEVICE: &str = "/dev/null";
#[cfg(windows)]
pub const NULL_DEVICE: &str = "NUL";
#[cfg(not(any(unix, windows)))]
pub const NULL_DEVICE: &str = "/dev/null";

/// Accepts every line and lets the destination throw it away.
pub struct DiscardAppender {
    path: PathBuf,
    file: File,
}

impl DiscardAppender {
    /// Open the null device
    pub fn new() -> Result<Self> {
        Self::open(NULL_DEVICE)
    }

    /// Open `path` as the discard destination (create, write, append, mode 0644).
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::SinkInit`] if the destination cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let file = options
            .open(&path)
            .map_err(|e| LoggerError::sink_init(&path, e))?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for DiscardAppender {
    fn write(&mut self, _level: LogLevel, formatted: &[u8]) -> Result<()> {
        self.file.write_all(formatted)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}
