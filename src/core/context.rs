//! Field binding and the shared logging surface
//!
//! This module provides:
//! - `Log`: level-gated log methods shared by loggers and contexts
//! - `Context`: a logger view that tags every record with bound fields

use super::{
    error::{LoggerError, Result},
    fields::{collect_fields, FieldValue, Fields},
    level::Level,
    logger::Logger,
    trace::TraceSpan,
};

/// Logging methods available on anything that can reach a [`Logger`].
///
/// Filtering and dispatch always happen in the logger; implementors only
/// decide which fields the resulting records carry. A `Logger` logs with no
/// fields, a [`Context`] with its bound set.
pub trait Log {
    fn logger(&self) -> &Logger;

    fn fields(&self) -> &Fields;

    /// Log at an arbitrary level.
    ///
    /// Fails with [`LoggerError::InvalidArgument`] for the `ALL` and `OFF`
    /// sentinels. A level below the logger's threshold is dropped silently.
    fn log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        self.logger().emit(level, message.into(), self.fields())
    }

    // Built-in levels are never sentinels, so the shortcuts cannot fail.

    #[inline]
    fn debug(&self, message: impl Into<String>) {
        let _ = self.log(Level::DEBUG, message);
    }

    #[inline]
    fn info(&self, message: impl Into<String>) {
        let _ = self.log(Level::INFO, message);
    }

    #[inline]
    fn warning(&self, message: impl Into<String>) {
        let _ = self.log(Level::WARNING, message);
    }

    #[inline]
    fn error(&self, message: impl Into<String>) {
        let _ = self.log(Level::ERROR, message);
    }

    /// Log at `FATAL`. With `die` set, the logger is closed (draining queued
    /// records) and the process exits with status 1.
    fn fatal(&self, message: impl Into<String>, die: bool) {
        let _ = self.log(Level::FATAL, message);
        if die {
            self.logger().terminate();
        }
    }

    /// Start a traced unit of work at `TRACE`
    ///
    /// See [`TraceSpan`] for the records it produces.
    fn trace(&self, message: impl Into<String>) -> TraceSpan {
        TraceSpan::begin(
            self.logger().clone(),
            self.fields().clone(),
            Level::TRACE,
            message.into(),
        )
    }

    /// Start a traced unit of work at a chosen level
    fn trace_at(&self, level: Level, message: impl Into<String>) -> Result<TraceSpan> {
        if level.is_sentinel() {
            return Err(LoggerError::invalid_argument(
                "level",
                format!("{} cannot be used for a trace span", level),
            ));
        }
        Ok(TraceSpan::begin(
            self.logger().clone(),
            self.fields().clone(),
            level,
            message.into(),
        ))
    }
}

/// A [`Logger`] plus a fixed set of fields.
///
/// Binding never mutates the logger or an existing context; it always returns
/// a new `Context`.
///
/// # Example
///
/// ```
/// use rust_logger_core::prelude::*;
///
/// let logger = Logger::named("billing");
/// let memory = MemoryHandler::new();
/// logger.add_handler(memory.clone());
///
/// let tenant = logger.bind([("tenant", "acme")]);
/// let invoice = tenant.with_field("invoice", 42);
///
/// invoice.warning("payment overdue");
/// logger.info("no fields here");
///
/// let records = memory.records();
/// assert_eq!(records[0].fields().len(), 2);
/// assert!(records[1].fields().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    logger: Logger,
    fields: Fields,
}

impl Context {
    pub(crate) fn new(logger: Logger, fields: Fields) -> Self {
        Self { logger, fields }
    }

    /// New context with this context's fields overlaid by `fields`
    pub fn bind<I, K, V>(&self, fields: I) -> Context
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut merged = self.fields.clone();
        merged.extend(collect_fields(fields));
        Context::new(self.logger.clone(), merged)
    }

    /// New context with one extra field
    pub fn with_field<K, V>(&self, key: K, value: V) -> Context
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.bind([(key, value)])
    }
}

impl Log for Context {
    fn logger(&self) -> &Logger {
        &self.logger
    }

    fn fields(&self) -> &Fields {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::MemoryHandler;

    #[test]
    fn test_context_attaches_fields() {
        let logger = Logger::new();
        let memory = MemoryHandler::new();
        logger.add_handler(memory.clone());

        let ctx = logger.bind([("user_id", FieldValue::from(123)), ("active", true.into())]);
        ctx.info("logged in");

        let records = memory.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("user_id"), Some(&FieldValue::Int(123)));
        assert_eq!(records[0].field("active"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_context_delegates_filtering() {
        let logger = Logger::new();
        let memory = MemoryHandler::new();
        logger.add_handler(memory.clone());

        let ctx = logger.bind([("k", "v")]);
        ctx.debug("throttled by the logger");
        assert!(memory.is_empty());

        logger.set_level(Level::DEBUG).unwrap();
        ctx.debug("now visible");
        assert_eq!(memory.len(), 1);

        assert!(ctx.log(Level::OFF, "x").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_nested_bind_does_not_mutate_parent() {
        let logger = Logger::new();
        let parent = logger.bind([("service", "api"), ("region", "eu")]);
        let child = parent.bind([("region", "us"), ("request", "r1")]);

        assert_eq!(parent.fields().len(), 2);
        assert_eq!(parent.fields()["region"], FieldValue::from("eu"));

        assert_eq!(child.fields().len(), 3);
        assert_eq!(child.fields()["region"], FieldValue::from("us"));
        assert!(Logger::ptr_eq(parent.logger(), child.logger()));
    }

    #[test]
    fn test_logger_has_no_fields() {
        let logger = Logger::new();
        let _ctx = logger.bind([("a", 1)]);
        assert!(logger.fields().is_empty());
    }

    #[test]
    fn test_trace_at_rejects_sentinels() {
        let logger = Logger::new();
        assert!(logger.trace_at(Level::ALL, "span").is_err());
        assert!(logger.trace_at(Level::OFF, "span").is_err());
    }
}
