//! File logging example
//!
//! Logs to the console and to a rotating file set rolled every minute,
//! keeping the three newest files.
//!
//! Run with: cargo run --example file_logging

use rust_logger_factory::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Logger Factory - File Logging Example ===\n");

    let logger = new_logger("debug", "logs/application.log", Duration::from_secs(60), 3, true)?;

    println!("1. Logging to both console and file:");
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warn("Item 3 took longer than expected");
        }
    }

    logger.info("All operations completed");
    logger.close()?;

    println!("\n=== Example completed successfully! ===");
    println!("'logs/application.log' links to the current file of the set");

    Ok(())
}
