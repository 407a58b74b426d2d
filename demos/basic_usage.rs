//! Basic logger usage example
//!
//! Builds a console logger from a level name and logs at every level.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_factory::prelude::*;
use rust_logger_factory::info;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Logger Factory - Basic Usage Example ===\n");

    let logger = new_logger("trace", "", Duration::ZERO, 0, true)?;

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");

    println!("\n2. Raising the threshold to warn:");
    logger.set_level(LogLevel::Warn);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n3. An unknown level name falls back to info:");
    let lenient = new_logger("verbose", "", Duration::ZERO, 0, true)?;
    lenient.report_diagnostics();
    info!(lenient, "Threshold is now {}", lenient.level());

    println!("\n=== Example completed successfully! ===");

    logger.close()?;
    lenient.close()
}
