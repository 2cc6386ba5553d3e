//! Scoped trace spans

use super::{fields::Fields, level::Level, logger::Logger};
use std::time::{Duration, Instant};

/// Field marking a span record as `"start"` or `"end"`
pub const SPAN_FIELD: &str = "span";

/// Field on the end record holding the elapsed time in microseconds
pub const ELAPSED_FIELD: &str = "elapsed_us";

/// A traced unit of work.
///
/// Creating a span logs one record tagged `span=start`. Finishing it, or
/// dropping it, logs one record with the same message tagged `span=end` and
/// `elapsed_us`. Both records carry the fields of the context that started the
/// span and go through the logger's normal threshold.
///
/// # Example
///
/// ```
/// use rust_logger_core::prelude::*;
///
/// let logger = Logger::new();
/// logger.set_level(Level::ALL).unwrap();
/// let memory = MemoryHandler::new();
/// logger.add_handler(memory.clone());
///
/// let span = logger.trace("load config");
/// span.finish();
///
/// let records = memory.records();
/// assert_eq!(records.len(), 2);
/// assert!(records[1].field(ELAPSED_FIELD).is_some());
/// ```
#[must_use = "dropping a span ends it immediately"]
pub struct TraceSpan {
    logger: Logger,
    fields: Fields,
    level: Level,
    message: String,
    started: Instant,
    ended: bool,
}

impl TraceSpan {
    /// `level` must not be a sentinel.
    pub(crate) fn begin(logger: Logger, fields: Fields, level: Level, message: String) -> Self {
        let mut start_fields = fields.clone();
        start_fields.insert(SPAN_FIELD.to_string(), "start".into());
        let _ = logger.emit(level.clone(), message.clone(), &start_fields);

        Self {
            logger,
            fields,
            level,
            message,
            started: Instant::now(),
            ended: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// End the span, returning its duration
    pub fn finish(mut self) -> Duration {
        self.end()
    }

    fn end(&mut self) -> Duration {
        let elapsed = self.started.elapsed();
        if self.ended {
            return elapsed;
        }
        self.ended = true;

        let micros = i64::try_from(elapsed.as_micros()).unwrap_or(i64::MAX);
        let mut end_fields = self.fields.clone();
        end_fields.insert(SPAN_FIELD.to_string(), "end".into());
        end_fields.insert(ELAPSED_FIELD.to_string(), micros.into());
        let _ = self
            .logger
            .emit(self.level.clone(), self.message.clone(), &end_fields);

        elapsed
    }
}

impl Drop for TraceSpan {
    fn drop(&mut self) {
        self.end();
    }
}
