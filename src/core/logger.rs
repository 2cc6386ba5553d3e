//! Logger dispatch core
//!
//! A [`Logger`] owns a severity threshold and an ordered set of handlers. Each
//! accepted log call builds one [`Record`] and broadcasts it to every handler
//! subscribed at that moment, either inline (synchronous mode) or through a
//! per-logger worker thread (async mode).
//!
//! Handlers may call back into the logger that is delivering to them. A
//! nested subscription takes effect from the next record. A nested log call is
//! queued behind the current batch in async mode. In synchronous mode it is
//! rejected with [`LoggerError::InvalidState`], since delivering it would
//! interleave with the record still in flight.

use super::{
    context::{Context, Log},
    error::{LoggerError, Result},
    fields::{collect_fields, FieldValue, Fields},
    handler::Handler,
    level::Level,
    metrics::LoggerMetrics,
    record::Record,
    registry::LoggerRegistry,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default time allowed for draining queued records on close (5 seconds)
///
/// Used by [`Logger::close`] and when the last handle to an unclosed logger is
/// dropped. Use [`Logger::close_with_timeout`] for a different bound.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum number of records the async worker delivers per batch
pub const DEFAULT_BATCH_SIZE: usize = 50;

static NO_FIELDS: Fields = Fields::new();

type Handlers = Vec<Box<dyn Handler>>;

/// Lifecycle of a logger's output stream. No transition leaves `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    Open,
    Closing,
    Closed,
}

impl LoggerState {
    const fn as_u8(self) -> u8 {
        match self {
            LoggerState::Open => 0,
            LoggerState::Closing => 1,
            LoggerState::Closed => 2,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => LoggerState::Open,
            1 => LoggerState::Closing,
            _ => LoggerState::Closed,
        }
    }
}

/// Subscribed handlers of one logger.
///
/// Subscribing only touches `pending`; delivery moves pending handlers to the
/// end of `active` before it starts. Neither side waits on the other, and
/// `active` keeps subscription order, so the first `n` entries are always the
/// first `n` subscribers.
struct HandlerSet {
    active: Mutex<Handlers>,
    pending: Mutex<Handlers>,
    count: AtomicUsize,
}

impl HandlerSet {
    fn new() -> Self {
        Self {
            active: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            count: AtomicUsize::new(0),
        }
    }

    fn subscribe(&self, handler: Box<dyn Handler>) {
        self.pending.lock().push(handler);
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    /// Subscribers so far, delivered to or not
    fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    fn admit(&self, active: &mut Handlers) {
        active.append(&mut *self.pending.lock());
    }

    fn id(&self) -> usize {
        self as *const Self as usize
    }
}

thread_local! {
    /// Handler sets the current thread is delivering to
    static DELIVERING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a handler set as delivering on the current thread until dropped
struct DeliveryGuard {
    set: usize,
}

impl DeliveryGuard {
    /// `None` if this thread is already delivering to `handlers`
    fn enter(handlers: &HandlerSet) -> Option<Self> {
        let set = handlers.id();
        DELIVERING.with(|delivering| {
            let mut delivering = delivering.borrow_mut();
            if delivering.contains(&set) {
                None
            } else {
                delivering.push(set);
                Some(Self { set })
            }
        })
    }

    fn is_active(handlers: &HandlerSet) -> bool {
        let set = handlers.id();
        DELIVERING.with(|delivering| delivering.borrow().contains(&set))
    }
}

impl Drop for DeliveryGuard {
    fn drop(&mut self) {
        let _ = DELIVERING.try_with(|delivering| {
            delivering.borrow_mut().retain(|&set| set != self.set);
        });
    }
}

/// A record waiting for the async worker.
///
/// `subscribers` is the handler count at emission time; handlers added later
/// sit past that index and never see this record.
struct Queued {
    record: Record,
    subscribers: usize,
}

struct AsyncChannel {
    /// Also serializes async subscriptions against emission
    sender: Mutex<Option<Sender<Queued>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl AsyncChannel {
    fn spawn(
        name: &str,
        batch_size: usize,
        handlers: Arc<HandlerSet>,
        metrics: Arc<LoggerMetrics>,
    ) -> Option<Self> {
        let (sender, receiver) = unbounded();

        let spawned = thread::Builder::new()
            .name(format!("logger-{}", name))
            .spawn(move || Self::run(receiver, batch_size, handlers, metrics));

        match spawned {
            Ok(handle) => Some(Self {
                sender: Mutex::new(Some(sender)),
                worker: Mutex::new(Some(handle)),
            }),
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to spawn delivery worker for '{}': {}. \
                     Falling back to synchronous delivery.",
                    name, e
                );
                None
            }
        }
    }

    fn run(
        receiver: Receiver<Queued>,
        batch_size: usize,
        handlers: Arc<HandlerSet>,
        metrics: Arc<LoggerMetrics>,
    ) {
        let mut batch = Vec::with_capacity(batch_size);

        // recv() only fails once every sender is gone and the queue is empty,
        // so the loop drains everything queued before close.
        while let Ok(queued) = receiver.recv() {
            batch.push(queued);

            while batch.len() < batch_size {
                match receiver.try_recv() {
                    Ok(queued) => batch.push(queued),
                    Err(_) => break,
                }
            }

            Logger::process_batch(&handlers, &batch, &metrics);
            batch.clear();
        }
    }

    /// Stop accepting records and wait for the worker to drain the queue
    fn shutdown(&self, timeout: Duration) -> bool {
        drop(self.sender.lock().take());

        let Some(handle) = self.worker.lock().take() else {
            return true;
        };

        // Closed by one of its own handlers: the worker exits after this batch.
        if handle.thread().id() == thread::current().id() {
            return false;
        }

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!(
                        "[LOGGER ERROR] Delivery worker panicked during close: {:?}",
                        e
                    );
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Delivery worker did not finish within {:?}. \
                     Queued records are still being delivered in the background.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

struct Inner {
    name: String,
    level: RwLock<Level>,
    handlers: Arc<HandlerSet>,
    channel: Option<AsyncChannel>,
    state: AtomicU8,
    sequence: AtomicU64,
    close_lock: Mutex<()>,
    metrics: Arc<LoggerMetrics>,
}

impl Inner {
    fn state(&self) -> LoggerState {
        LoggerState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: LoggerState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }

    /// Drain, flush and mark closed. Caller holds `close_lock` or is the last owner.
    fn release(&self, timeout: Duration) -> bool {
        if self.state() == LoggerState::Closed {
            return true;
        }
        self.set_state(LoggerState::Closing);

        let mut drained = match self.channel {
            Some(ref channel) => channel.shutdown(timeout),
            None => true,
        };

        if DeliveryGuard::is_active(&self.handlers) {
            // The handler set is locked further up this thread's stack.
            eprintln!(
                "[LOGGER WARNING] '{}' closed from inside one of its handlers; skipping final flush.",
                self.name
            );
        } else {
            // Waits for any in-flight delivery before the final flush.
            match self.handlers.active.try_lock_for(timeout) {
                Some(mut active) => Logger::flush_isolated(&mut active),
                None => {
                    eprintln!(
                        "[LOGGER WARNING] Handlers of '{}' still busy after {:?}; closing without flush.",
                        self.name, timeout
                    );
                    drained = false;
                }
            }
        }

        self.set_state(LoggerState::Closed);
        drained
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.release(DEFAULT_SHUTDOWN_TIMEOUT);

        let failures = self.metrics.handler_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' released with {} failed handler invocations (failure rate: {:.2}%)",
                self.name,
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Handle to a logger instance.
///
/// Cloning yields another handle to the same instance; use [`Logger::ptr_eq`]
/// to compare identity. Loggers built with [`Logger::new`] or the builder are
/// never registered; use [`get_logger`](super::registry::get_logger) for a
/// shared instance looked up by name.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Unregistered synchronous logger named `""` at `INFO`
    #[must_use]
    pub fn new() -> Self {
        Self::create(String::new(), Level::INFO, false, DEFAULT_BATCH_SIZE)
    }

    /// Unregistered synchronous logger at `INFO`
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::create(name.into(), Level::INFO, false, DEFAULT_BATCH_SIZE)
    }

    fn create(name: String, level: Level, async_mode: bool, batch_size: usize) -> Self {
        let handlers = Arc::new(HandlerSet::new());
        let metrics = Arc::new(LoggerMetrics::new());

        let channel = if async_mode {
            AsyncChannel::spawn(
                &name,
                batch_size.max(1),
                Arc::clone(&handlers),
                Arc::clone(&metrics),
            )
        } else {
            None
        };

        Self {
            inner: Arc::new(Inner {
                name,
                level: RwLock::new(level),
                handlers,
                channel,
                state: AtomicU8::new(LoggerState::Open.as_u8()),
                sequence: AtomicU64::new(0),
                close_lock: Mutex::new(()),
                metrics,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current severity threshold
    pub fn level(&self) -> Level {
        self.inner.level.read().clone()
    }

    /// Change the severity threshold for future log calls.
    ///
    /// Any level is accepted, including the `ALL` and `OFF` sentinels. Passing
    /// `None` fails with [`LoggerError::InvalidArgument`] and keeps the current
    /// threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_core::{Level, Logger};
    ///
    /// let logger = Logger::new();
    /// logger.set_level(Level::FATAL).unwrap();
    /// assert!(logger.set_level(None).is_err());
    /// assert_eq!(logger.level(), Level::FATAL);
    /// ```
    pub fn set_level(&self, level: impl Into<Option<Level>>) -> Result<()> {
        let level = level.into().ok_or_else(|| {
            LoggerError::invalid_argument("level", "a logger level cannot be absent")
        })?;
        *self.inner.level.write() = level;
        Ok(())
    }

    /// Whether records are delivered by a background worker
    pub fn is_async(&self) -> bool {
        self.inner.channel.is_some()
    }

    /// Subscribe a handler to every record emitted from now on
    pub fn add_handler<H: Handler + 'static>(&self, handler: H) {
        self.add_boxed_handler(Box::new(handler));
    }

    /// Never waits for a delivery in progress, so handlers may call it too.
    pub fn add_boxed_handler(&self, handler: Box<dyn Handler>) {
        match self.inner.channel {
            Some(ref channel) => {
                let _emission = channel.sender.lock();
                self.inner.handlers.subscribe(handler);
            }
            None => self.inner.handlers.subscribe(handler),
        }
    }

    pub fn handler_count(&self) -> usize {
        self.inner.handlers.count()
    }

    /// Bind fields to a [`Context`] that logs through this logger
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_core::prelude::*;
    ///
    /// let logger = Logger::named("http");
    /// let memory = MemoryHandler::new();
    /// logger.add_handler(memory.clone());
    ///
    /// let request = logger.bind([("request_id", "r-17")]);
    /// request.info("accepted");
    ///
    /// let records = memory.records();
    /// assert_eq!(records[0].field("request_id").unwrap().to_string(), "r-17");
    /// ```
    pub fn bind<I, K, V>(&self, fields: I) -> Context
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Context::new(self.clone(), collect_fields(fields))
    }

    pub fn state(&self) -> LoggerState {
        self.inner.state()
    }

    pub fn is_closed(&self) -> bool {
        self.state() == LoggerState::Closed
    }

    /// Close the output stream.
    ///
    /// Records already queued are delivered and handlers are flushed before
    /// this returns. Later log calls are dropped silently. Calling `close` on a
    /// closed logger does nothing. The logger stays in the registry.
    pub fn close(&self) {
        self.close_with_timeout(DEFAULT_SHUTDOWN_TIMEOUT);
    }

    /// Close, waiting at most `timeout` for queued records to drain
    ///
    /// Returns `true` if every queued record was delivered in time. The logger
    /// ends up closed either way. After a timeout the worker keeps delivering
    /// what was queued before close in the background, so handlers can still
    /// receive records after [`is_closed`](Self::is_closed) returns `true`.
    /// No record logged after close is ever delivered.
    pub fn close_with_timeout(&self, timeout: Duration) -> bool {
        let _guard = self.inner.close_lock.lock();
        self.inner.release(timeout)
    }

    /// Flush every handler, stopping at the first error
    ///
    /// Fails with [`LoggerError::InvalidState`] when called from inside one of
    /// this logger's handlers.
    pub fn flush(&self) -> Result<()> {
        if DeliveryGuard::is_active(&self.inner.handlers) {
            return Err(LoggerError::invalid_state(format!(
                "'{}' cannot be flushed from inside one of its handlers",
                self.inner.name
            )));
        }

        let mut active = self.inner.handlers.active.lock();
        for handler in active.iter_mut() {
            handler.flush()?;
        }
        Ok(())
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_core::prelude::*;
    ///
    /// let logger = Logger::new();
    /// logger.debug("below threshold");
    /// logger.info("accepted");
    ///
    /// assert_eq!(logger.metrics().throttled(), 1);
    /// assert_eq!(logger.metrics().emitted(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Whether two handles refer to the same logger instance
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Validate, throttle, build and broadcast one record
    pub(crate) fn emit(&self, level: Level, message: String, fields: &Fields) -> Result<()> {
        if level.is_sentinel() {
            return Err(LoggerError::invalid_argument(
                "level",
                format!("{} is a filter threshold and cannot be logged", level),
            ));
        }

        if level < *self.inner.level.read() {
            self.inner.metrics.record_throttled();
            return Ok(());
        }

        match self.inner.channel {
            Some(ref channel) => {
                self.enqueue(channel, level, message, fields);
                Ok(())
            }
            None => self.deliver_now(level, message, fields),
        }
    }

    /// Close, then end the process with exit status 1
    pub(crate) fn terminate(&self) -> ! {
        self.close();
        std::process::exit(1)
    }

    fn deliver_now(&self, level: Level, message: String, fields: &Fields) -> Result<()> {
        let inner = &self.inner;
        let Some(_delivering) = DeliveryGuard::enter(&inner.handlers) else {
            eprintln!(
                "[LOGGER ERROR] A handler of '{}' logged to it during delivery; record dropped: {}",
                inner.name, message
            );
            inner.metrics.record_dropped_reentrant();
            return Err(LoggerError::invalid_state(format!(
                "'{}' is delivering a record on this thread",
                inner.name
            )));
        };
        let mut active = inner.handlers.active.lock();

        if inner.state() != LoggerState::Open {
            inner.metrics.record_dropped_after_close();
            return Ok(());
        }

        inner.handlers.admit(&mut active);
        let sequence = inner.next_sequence();
        let record = Record::new(level, message, &inner.name, fields.clone(), sequence);
        inner.metrics.record_emitted();
        Self::deliver(&mut active, &record, &inner.metrics);
        Ok(())
    }

    fn enqueue(&self, channel: &AsyncChannel, level: Level, message: String, fields: &Fields) {
        let inner = &self.inner;
        // Async subscriptions take the same lock, so the subscriber count read
        // here matches exactly the handlers subscribed before this record.
        let slot = channel.sender.lock();

        let Some(sender) = slot.as_ref() else {
            inner.metrics.record_dropped_after_close();
            return;
        };

        let sequence = inner.next_sequence();
        let record = Record::new(level, message, &inner.name, fields.clone(), sequence);
        let queued = Queued {
            record,
            subscribers: inner.handlers.count(),
        };

        if sender.send(queued).is_ok() {
            inner.metrics.record_emitted();
        } else {
            inner.metrics.record_dropped_after_close();
        }
    }

    /// Deliver a batch of queued records.
    ///
    /// Each record only reaches the handlers that were subscribed when it was
    /// emitted.
    fn process_batch(handlers: &HandlerSet, batch: &[Queued], metrics: &LoggerMetrics) {
        let _delivering = DeliveryGuard::enter(handlers);
        let mut active = handlers.active.lock();
        handlers.admit(&mut active);

        for queued in batch {
            let subscribers = queued.subscribers.min(active.len());
            Self::deliver(&mut active[..subscribers], &queued.record, metrics);
        }

        Self::flush_isolated(&mut active);
    }

    /// Hand one record to each handler with per-handler panic isolation.
    ///
    /// A failing handler is reported and counted; the others still receive the
    /// record.
    fn deliver(handlers: &mut [Box<dyn Handler>], record: &Record, metrics: &LoggerMetrics) {
        for (idx, handler) in handlers.iter_mut().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler.handle(record)
            }));

            match result {
                Ok(Ok(())) => {
                    metrics.record_delivered();
                }
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Handler #{} ({}) failed: {}",
                        idx,
                        handler.name(),
                        e
                    );
                    metrics.record_handler_failure();
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Handler #{} ({}) panicked: {}. \
                         Other handlers continue to function.",
                        idx,
                        handler.name(),
                        panic_message(panic_info.as_ref())
                    );
                    metrics.record_handler_failure();
                }
            }
        }
    }

    fn flush_isolated(handlers: &mut [Box<dyn Handler>]) {
        for (idx, handler) in handlers.iter_mut().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler.flush()));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Handler #{} flush failed: {}", idx, e);
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Handler #{} panicked during flush: {}",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                }
            }
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("level", &self.level())
            .field("async", &self.is_async())
            .field("state", &self.state())
            .finish()
    }
}

impl Log for Logger {
    fn logger(&self) -> &Logger {
        self
    }

    fn fields(&self) -> &Fields {
        &NO_FIELDS
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logger_core::prelude::*;
///
/// let logger = Logger::builder()
///     .name("worker")
///     .level(Level::DEBUG)
///     .handler(MemoryHandler::new())
///     .async_mode(true)
///     .build();
///
/// assert_eq!(logger.name(), "worker");
/// assert!(logger.is_async());
/// logger.close();
/// ```
pub struct LoggerBuilder {
    name: String,
    level: Level,
    async_mode: bool,
    batch_size: usize,
    handlers: Vec<Box<dyn Handler>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: String::new(),
            level: Level::INFO,
            async_mode: false,
            batch_size: DEFAULT_BATCH_SIZE,
            handlers: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the initial severity threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Deliver records on a background worker instead of inline
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, enabled: bool) -> Self {
        self.async_mode = enabled;
        self
    }

    /// Maximum records the async worker delivers per batch (minimum 1)
    #[must_use = "builder methods return a new value"]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Build a fresh, unregistered Logger
    pub fn build(self) -> Logger {
        let logger = Logger::create(self.name, self.level, self.async_mode, self.batch_size);
        for handler in self.handlers {
            logger.add_boxed_handler(handler);
        }
        logger
    }

    /// Look the name up in `registry`, creating the logger from this
    /// configuration if it is missing.
    ///
    /// An existing logger keeps its level and delivery mode; the configured
    /// handlers are subscribed to it either way.
    pub fn register(self, registry: &LoggerRegistry) -> Logger {
        let LoggerBuilder {
            name,
            level,
            async_mode,
            batch_size,
            handlers,
        } = self;

        let logger = registry.get_or_insert_with(&name, || {
            Logger::create(name.clone(), level, async_mode, batch_size)
        });
        for handler in handlers {
            logger.add_boxed_handler(handler);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
