//! Error types for the logger factory

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The primary (discard) sink could not be opened
    #[error("Failed to open output sink '{path}': {source}")]
    SinkInit {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The rotating file backend could not be initialized
    #[error("Failed to initialize rotating log at '{path}': {message}")]
    RotationInit { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotation { path: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a sink initialization error
    pub fn sink_init(path: &Path, source: std::io::Error) -> Self {
        LoggerError::SinkInit {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create a rotation backend initialization error
    pub fn rotation_init(path: &Path, message: impl Into<String>) -> Self {
        LoggerError::RotationInit {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// True for the two construction-time failure kinds
    pub fn is_init_error(&self) -> bool {
        matches!(
            self,
            LoggerError::SinkInit { .. } | LoggerError::RotationInit { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_creation() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::sink_init(Path::new("/dev/null"), io_err);
        assert!(matches!(err, LoggerError::SinkInit { .. }));
        assert!(err.is_init_error());

        let err = LoggerError::rotation_init(Path::new("/var/log/app.log"), "Permission denied");
        assert!(matches!(err, LoggerError::RotationInit { .. }));
        assert!(err.is_init_error());

        assert!(!LoggerError::other("x").is_init_error());
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::rotation_init(Path::new("/var/log/app.log"), "Disk full");
        assert_eq!(
            err.to_string(),
            "Failed to initialize rotating log at '/var/log/app.log': Disk full"
        );

        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );
    }

    #[test]
    fn test_sink_init_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no device");
        let err = LoggerError::sink_init(Path::new("/nope"), io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/nope"));
    }
}
