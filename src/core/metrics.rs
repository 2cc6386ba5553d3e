//! Logger metrics for observability
//!
//! Counters describing what a logger did with each log call: how many records
//! it emitted, throttled, delivered, or discarded, and how many handler
//! invocations failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_logger_core::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_emitted();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records built and pushed onto the broadcast
    emitted: AtomicU64,

    /// Log calls dropped by the severity threshold
    throttled: AtomicU64,

    /// Successful handler invocations
    delivered: AtomicU64,

    /// Handler invocations that returned an error or panicked
    handler_failures: AtomicU64,

    /// Log calls that arrived after close began
    dropped_after_close: AtomicU64,

    /// Synchronous log calls made from inside the logger's own handlers
    dropped_reentrant: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            throttled: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
            dropped_after_close: AtomicU64::new(0),
            dropped_reentrant: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn throttled(&self) -> u64 {
        self.throttled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_after_close(&self) -> u64 {
        self.dropped_after_close.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_reentrant(&self) -> u64 {
        self.dropped_reentrant.load(Ordering::Relaxed)
    }

    /// Record an emitted record, returning the previous count
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_throttled(&self) -> u64 {
        self.throttled.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_after_close(&self) -> u64 {
        self.dropped_after_close.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_reentrant(&self) -> u64 {
        self.dropped_reentrant.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of handler invocations that failed, as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no handler has been invoked.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.handler_failures() as f64;
        let total = self.delivered() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.throttled.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
        self.dropped_after_close.store(0, Ordering::Relaxed);
        self.dropped_reentrant.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted()),
            throttled: AtomicU64::new(self.throttled()),
            delivered: AtomicU64::new(self.delivered()),
            handler_failures: AtomicU64::new(self.handler_failures()),
            dropped_after_close: AtomicU64::new(self.dropped_after_close()),
            dropped_reentrant: AtomicU64::new(self.dropped_reentrant()),
        }
    }
}
