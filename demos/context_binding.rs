//! Context binding and trace span example
//!
//! Run with: cargo run --example context_binding

use rust_logger_core::prelude::*;
use std::thread;
use std::time::Duration;

fn handle_request(request: &Context) {
    let span = request.trace("handle request");
    request.info("request accepted");

    thread::sleep(Duration::from_millis(20));

    let user = request.with_field("user_id", 42);
    user.warning("quota almost exhausted");

    let elapsed = span.finish();
    println!("   handled in {:?}", elapsed);
}

fn main() -> Result<()> {
    println!("=== Rust Logger Core - Context Binding Example ===\n");

    let logger = get_logger_with("http", Level::ALL, false);
    logger.add_handler(ConsoleHandler::new());

    let service = logger.bind([("service", "api-gateway"), ("version", "1.2.3")]);
    for id in ["r-1", "r-2"] {
        handle_request(&service.with_field("request_id", id));
    }

    logger.info("records logged directly carry no fields");
    logger.close();

    Ok(())
}
