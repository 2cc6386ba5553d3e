//! Handler trait for record consumers

use super::{error::Result, record::Record};

/// Receives records broadcast by a [`Logger`](super::logger::Logger).
///
/// `handle` is called once per emitted record for every handler subscribed at
/// emission time. A returned error or a panic is reported and isolated: the
/// remaining handlers still receive the record.
///
/// A handler may subscribe new handlers or log to the logger that is
/// delivering to it. A nested log call is queued behind the current batch in
/// async mode and rejected with
/// [`LoggerError::InvalidState`](super::error::LoggerError::InvalidState) in
/// synchronous mode.
pub trait Handler: Send + Sync {
    fn handle(&mut self, record: &Record) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "handler"
    }
}

/// Adapts a closure into a [`Handler`]
pub struct FnHandler<F> {
    name: String,
    func: F,
}

impl<F> FnHandler<F>
where
    F: FnMut(&Record) + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: FnMut(&Record) + Send + Sync,
{
    fn handle(&mut self, record: &Record) -> Result<()> {
        (self.func)(record);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wrap a closure as a handler
///
/// # Example
///
/// ```
/// use rust_logger_core::prelude::*;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
///
/// let logger = Logger::new();
/// logger.add_handler(handler_fn(move |_record: &Record| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// }));
///
/// logger.info("hello");
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub fn handler_fn<F>(func: F) -> FnHandler<F>
where
    F: FnMut(&Record) + Send + Sync,
{
    FnHandler::new("fn", func)
}
