//! Async logging example
//!
//! Demonstrates worker-thread delivery with several emitting threads.
//!
//! Run with: cargo run --example async_logging

use rust_logger_core::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Logger Core - Async Logging Example ===\n");

    let logger = Logger::builder()
        .name("async-demo")
        .async_mode(true)
        .handler(ConsoleHandler::new())
        .build();

    let memory = MemoryHandler::new();
    logger.add_handler(memory.clone());

    println!("1. Queued logging:");
    for i in 0..20 {
        logger.info(format!("Message #{}", i));
    }

    println!("\n2. Multi-threaded logging:");
    let mut handles = vec![];
    for thread_id in 0..5 {
        let ctx = logger.bind([("thread", thread_id)]);
        handles.push(thread::spawn(move || {
            for i in 0..5 {
                ctx.info(format!("Step {}", i));
                thread::sleep(Duration::from_millis(5));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    // close() delivers everything still queued before returning
    logger.close();

    println!("\n=== Example completed successfully! ===");
    println!("Delivered {} records", memory.len());

    Ok(())
}
