//! Basic logger usage example
//!
//! Demonstrates synchronous logging with a console handler and different levels.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_core::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Logger Core - Basic Usage Example ===\n");

    // Shared logger from the global registry
    let logger = get_logger("basic");
    logger.add_handler(ConsoleHandler::new());
    logger.set_level(Level::ALL)?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message", false);

    println!("\n2. Custom level between INFO and WARNING:");
    let notice = Level::new("NOTICE", 850);
    logger.log(notice, "This is a notice")?;

    println!("\n3. Raising the threshold to WARNING:");
    logger.set_level(Level::WARNING)?;
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warning("Warning message (visible)");

    println!("\n4. Same name, same logger:");
    let again = get_logger("basic");
    println!("   identical instance: {}", Logger::ptr_eq(&logger, &again));

    logger.close();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
