//! Core logger types and traits

pub mod context;
pub mod error;
pub mod fields;
pub mod handler;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod trace;

pub use context::{Context, Log};
pub use error::{LoggerError, Result};
pub use fields::{format_fields, FieldValue, Fields};
pub(crate) use fields::collect_fields;
pub use handler::{handler_fn, FnHandler, Handler};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, LoggerState, DEFAULT_BATCH_SIZE, DEFAULT_SHUTDOWN_TIMEOUT};
pub use metrics::LoggerMetrics;
pub use record::Record;
pub use registry::{get_logger, get_logger_with, LoggerRegistry};
pub use trace::{TraceSpan, ELAPSED_FIELD, SPAN_FIELD};
