//! Time-windowed rotating file appender
//!
//! Records go to `<path>.<YYYYMMDDHHMMSS>`, where the suffix is the local start
//! time of the current rotation window. `<path>` itself is kept as a symlink to
//! the active file, and older files are pruned by count or by age.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_level::LogLevel;
use chrono::{DateTime, Local, TimeZone};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Window length used when none is configured
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(24 * 3600);

/// Age limit used when no file count is configured
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(7 * 24 * 3600);

/// strftime pattern of the rotated file suffix
pub const FILE_SUFFIX_FORMAT: &str = "%Y%m%d%H%M%S";

const FILE_SUFFIX_LEN: usize = 14;

/// Which rotated files survive a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Keep the newest `n` files
    Count(usize),
    /// Delete files not modified within this long
    MaxAge(Duration),
}

impl Retention {
    /// `0` means "no count limit", which falls back to [`DEFAULT_MAX_AGE`]
    #[must_use]
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Retention::MaxAge(DEFAULT_MAX_AGE)
        } else {
            Retention::Count(count)
        }
    }
}

impl Default for Retention {
    fn default() -> Self {
        Retention::MaxAge(DEFAULT_MAX_AGE)
    }
}

/// Configuration for rotating file appender
///
/// # Examples
///
/// ```
/// use rust_logger_factory::appenders::{Retention, RotationPolicy};
/// use std::time::Duration;
///
/// // Hourly files, keep the last 24
/// let policy = RotationPolicy::new()
///     .with_interval(Duration::from_secs(3600))
///     .with_max_files(24);
/// assert_eq!(policy.retention, Retention::Count(24));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Length of one rotation window
    pub interval: Duration,
    pub retention: Retention,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_ROTATION_INTERVAL,
            retention: Retention::default(),
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window length; zero keeps the default of one day
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = if interval.is_zero() {
            DEFAULT_ROTATION_INTERVAL
        } else {
            interval
        };
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Keep at most `count` files; zero switches to age based pruning
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_files(mut self, count: usize) -> Self {
        self.retention = Retention::from_count(count);
        self
    }
}

/// Rotating file appender
///
/// # Examples
///
/// ```no_run
/// use rust_logger_factory::appenders::{RotatingFileAppender, RotationPolicy};
/// use std::time::Duration;
///
/// let policy = RotationPolicy::new()
///     .with_interval(Duration::from_secs(3600))
///     .with_max_files(24);
/// let appender = RotatingFileAppender::new("/var/log/app.log", policy).unwrap();
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<LineWriter<File>>,
    current_file: PathBuf,
}

impl RotatingFileAppender {
    /// Open the file for the current window, link it and prune old files.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::RotationInit`] if the path has no file name, the
    /// directory cannot be created, or the file or link cannot be written.
    pub fn new<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if base_path.file_name().is_none() {
            return Err(LoggerError::rotation_init(
                &base_path,
                "log path has no file name",
            ));
        }

        if let Some(parent) = base_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::rotation_init(
                    &base_path,
                    format!("Failed to create directory '{}': {}", parent.display(), e),
                )
            })?;
        }

        let interval = policy.interval;
        let mut appender = Self {
            base_path,
            policy: policy.with_interval(interval),
            writer: None,
            current_file: PathBuf::new(),
        };

        let now = Local::now();
        let first_file = appender.file_for(now);
        let preexisting = fs::symlink_metadata(&first_file).is_ok();

        if let Err(e) = appender.open_window(now) {
            drop(appender.writer.take());
            if !preexisting {
                let _ = fs::remove_file(&first_file);
            }
            return Err(LoggerError::rotation_init(&appender.base_path, e.to_string()));
        }

        Ok(appender)
    }

    /// Local start of the window containing `now`, aligned to the Unix epoch
    fn window_start(&self, now: DateTime<Local>) -> DateTime<Local> {
        let interval_ms = i64::try_from(self.policy.interval.as_millis())
            .unwrap_or(i64::MAX)
            .max(1);
        let millis = now.timestamp_millis();
        let start = millis - millis.rem_euclid(interval_ms);
        Local.timestamp_millis_opt(start).single().unwrap_or(now)
    }

    /// File that holds records written at `now`
    fn file_for(&self, now: DateTime<Local>) -> PathBuf {
        let suffix = self.window_start(now).format(FILE_SUFFIX_FORMAT);
        let mut name: OsString = self.base_path.clone().into_os_string();
        name.push(format!(".{}", suffix));
        PathBuf::from(name)
    }

    /// Switch to the file for `now`. The old writer stays in place if the new
    /// file cannot be opened.
    fn open_window(&mut self, now: DateTime<Local>) -> Result<()> {
        let target = self.file_for(now);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}': {}", target.display(), e),
                    e,
                )
            })?;

        if let Some(mut old) = self.writer.replace(LineWriter::new(file)) {
            if let Err(e) = old.flush() {
                eprintln!(
                    "[WARN] Failed to flush {} before rotation: {}",
                    self.current_file.display(),
                    e
                );
            }
        }
        self.current_file = target;

        self.update_link()?;
        self.prune();
        Ok(())
    }

    /// Point `<path>` at the active file, replacing any previous link atomically
    #[cfg(unix)]
    fn update_link(&self) -> Result<()> {
        let link_dest = self
            .current_file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.current_file.clone());

        let mut tmp_name = self.base_path.clone().into_os_string();
        tmp_name.push("_symlink");
        let tmp_link = PathBuf::from(tmp_name);

        let _ = fs::remove_file(&tmp_link);
        std::os::unix::fs::symlink(&link_dest, &tmp_link).map_err(|e| {
            LoggerError::io_operation(
                "linking log file",
                format!("cannot create '{}': {}", tmp_link.display(), e),
                e,
            )
        })?;
        fs::rename(&tmp_link, &self.base_path).map_err(|e| {
            let _ = fs::remove_file(&tmp_link);
            LoggerError::io_operation(
                "linking log file",
                format!("cannot replace '{}': {}", self.base_path.display(), e),
                e,
            )
        })
    }

    #[cfg(not(unix))]
    fn update_link(&self) -> Result<()> {
        Ok(())
    }

    /// Rotated files next to the base path, oldest first
    fn rotated_files(&self) -> Vec<PathBuf> {
        let dir = match self.base_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let Some(base_name) = self.base_path.file_name().and_then(|n| n.to_str()) else {
            return Vec::new();
        };
        let prefix = format!("{}.", base_name);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("[WARN] Cannot list {} for pruning: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.strip_prefix(&prefix))
                    .is_some_and(|suffix| {
                        suffix.len() == FILE_SUFFIX_LEN
                            && suffix.bytes().all(|b| b.is_ascii_digit())
                    })
            })
            .map(|entry| entry.path())
            .collect();

        // suffixes are timestamps, so name order is age order
        files.sort();
        files
    }

    /// Delete files outside the retention policy. Failures are reported, not returned.
    ///
    /// The active file always survives and counts toward `Retention::Count`.
    fn prune(&self) {
        let files: Vec<PathBuf> = self
            .rotated_files()
            .into_iter()
            .filter(|path| *path != self.current_file)
            .collect();

        let doomed: Vec<&PathBuf> = match self.policy.retention {
            Retention::Count(keep) => {
                let excess = files.len().saturating_sub(keep.saturating_sub(1));
                files.iter().take(excess).collect()
            }
            Retention::MaxAge(max_age) => {
                let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
                    return;
                };
                files
                    .iter()
                    .filter(|path| {
                        fs::metadata(path)
                            .and_then(|m| m.modified())
                            .is_ok_and(|modified| modified < cutoff)
                    })
                    .collect()
            }
        };

        for path in doomed {
            if let Err(e) = fs::remove_file(path) {
                eprintln!("[WARN] Failed to remove old log file {}: {}", path.display(), e);
            }
        }
    }

    fn write_at(&mut self, now: DateTime<Local>, formatted: &[u8]) -> Result<()> {
        if self.file_for(now) != self.current_file {
            if let Err(e) = self.open_window(now) {
                eprintln!(
                    "[WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );
            }
        }

        let writer = self.writer.as_mut().ok_or_else(|| {
            LoggerError::file_rotation(
                self.base_path.display().to_string(),
                "no open log file",
            )
        })?;

        writer.write_all(formatted).map_err(|e| {
            LoggerError::io_operation(
                "writing log entry",
                format!("cannot write to '{}'", self.current_file.display()),
                e,
            )
        })
    }

    /// The stable path (the link)
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// The file currently being written
    #[must_use]
    pub fn current_file(&self) -> &Path {
        &self.current_file
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }
}

impl Appender for RotatingFileAppender {
    fn write(&mut self, _level: LogLevel, formatted: &[u8]) -> Result<()> {
        self.write_at(Local::now(), formatted)
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::io_operation(
                    "flushing log file",
                    format!("cannot flush '{}'", self.current_file.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "rotating_file"
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
