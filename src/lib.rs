//! # Rust Logger Core
//!
//! The dispatch core of a structured logging system: named loggers that filter
//! records by severity and broadcast them to handlers.
//!
//! ## Features
//!
//! - **Open severity model**: built-in levels plus custom ones, compared by value
//! - **Shared loggers**: one instance per name through [`get_logger`]
//! - **Ordered broadcast**: synchronous or worker-thread delivery, with handler isolation
//! - **Bound fields**: [`Context`] tags records without touching the logger
//! - **Graceful close**: queued records are delivered before `close` returns
//!
//! ```
//! use rust_logger_core::prelude::*;
//!
//! let logger = get_logger("lib.overview");
//! let memory = MemoryHandler::new();
//! logger.add_handler(memory.clone());
//!
//! logger.info("service started");
//! logger.bind([("port", 8080)]).warning("port in use, retrying");
//!
//! assert_eq!(memory.len(), 2);
//! ```

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        get_logger, get_logger_with, handler_fn, Context, FieldValue, Fields, Handler, Level, Log,
        Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry, LoggerState, Record,
        Result, TraceSpan, DEFAULT_SHUTDOWN_TIMEOUT, ELAPSED_FIELD, SPAN_FIELD,
    };
    pub use crate::handlers::{ConsoleHandler, MemoryHandler};
}

pub use crate::core::{
    get_logger, get_logger_with, handler_fn, Context, FieldValue, Fields, FnHandler, Handler,
    Level, Log, Logger, LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry, LoggerState,
    Record, Result, TraceSpan, DEFAULT_BATCH_SIZE, DEFAULT_SHUTDOWN_TIMEOUT, ELAPSED_FIELD,
    SPAN_FIELD,
};
pub use handlers::{ConsoleHandler, MemoryHandler};
