//! Appender implementations

pub mod console;
pub mod discard;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use discard::DiscardAppender;
pub use rotating_file::{
    Retention, RotatingFileAppender, RotationPolicy, DEFAULT_MAX_AGE, DEFAULT_ROTATION_INTERVAL,
};

pub use crate::core::Appender;
