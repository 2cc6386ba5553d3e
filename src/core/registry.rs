//! Name to logger registry
//!
//! A [`LoggerRegistry`] holds at most one [`Logger`] per name. Lookup and
//! insertion happen under a single lock, so concurrent lookups of a new name
//! all receive the same instance. Entries are never evicted.
//!
//! [`LoggerRegistry::global`] is the process-wide registry behind
//! [`get_logger`]. It is created on first use and lives until process exit.
//! Code that wants isolation can own a registry of its own and pass it around.

use super::{level::Level, logger::Logger};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::collections::HashMap;

static GLOBAL_REGISTRY: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::new);

#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Logger>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self {
            loggers: Mutex::new(HashMap::new()),
        }
    }

    pub fn global() -> &'static LoggerRegistry {
        &GLOBAL_REGISTRY
    }

    /// Logger registered under `name`, created at `INFO` with synchronous
    /// delivery if missing
    pub fn get_logger(&self, name: &str) -> Logger {
        self.get_logger_with(name, Level::INFO, false)
    }

    /// Logger registered under `name`.
    ///
    /// `level` and `async_mode` only apply when the logger has to be created;
    /// an existing logger is returned unchanged.
    pub fn get_logger_with(&self, name: &str, level: Level, async_mode: bool) -> Logger {
        self.get_or_insert_with(name, || {
            Logger::builder()
                .name(name)
                .level(level)
                .async_mode(async_mode)
                .build()
        })
    }

    pub(crate) fn get_or_insert_with(&self, name: &str, create: impl FnOnce() -> Logger) -> Logger {
        let mut loggers = self.loggers.lock();
        loggers.entry(name.to_string()).or_insert_with(create).clone()
    }

    /// Registered logger, without creating one
    pub fn get(&self, name: &str) -> Option<Logger> {
        self.loggers.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Shared logger for `name` from the global registry
///
/// # Example
///
/// ```
/// use rust_logger_core::{get_logger, Logger};
///
/// let a = get_logger("doc.get_logger");
/// let b = get_logger("doc.get_logger");
/// assert!(Logger::ptr_eq(&a, &b));
/// ```
pub fn get_logger(name: &str) -> Logger {
    LoggerRegistry::global().get_logger(name)
}

/// Shared logger for `name` from the global registry, created with `level`
/// and `async_mode` if missing
pub fn get_logger_with(name: &str, level: Level, async_mode: bool) -> Logger {
    LoggerRegistry::global().get_logger_with(name, level, async_mode)
}
