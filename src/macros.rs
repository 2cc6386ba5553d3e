//! Logging macros for ergonomic log message formatting.
//!
//! These macros accept anything implementing [`Log`](crate::Log) (a `Logger`,
//! a `Context`, or a reference to either) followed by `format!` arguments.
//!
//! # Examples
//!
//! ```
//! use rust_logger_core::prelude::*;
//! use rust_logger_core::info;
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let request = logger.bind([("request_id", "abc")]);
//! info!(request, "User {} performed action: {}", 42, "login");
//! ```

/// Log a message at an arbitrary level, returning the `Result` of the call.
///
/// # Examples
///
/// ```
/// # use rust_logger_core::prelude::*;
/// # let logger = Logger::new();
/// use rust_logger_core::log;
/// log!(logger, Level::INFO, "Simple message").unwrap();
/// log!(logger, Level::ERROR, "Error code: {}", 500).unwrap();
/// assert!(log!(logger, Level::OFF, "rejected").is_err());
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.log($level, format!($($arg)+))
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_core::prelude::*;
/// # let logger = Logger::new();
/// use rust_logger_core::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.debug(format!($($arg)+))
    }};
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.info(format!($($arg)+))
    }};
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_logger_core::prelude::*;
/// # let logger = Logger::new();
/// use rust_logger_core::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.warning(format!($($arg)+))
    }};
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.error(format!($($arg)+))
    }};
}

/// Log a fatal-level message and terminate the process.
///
/// Use `die = false` to log without exiting.
///
/// # Examples
///
/// ```
/// # use rust_logger_core::prelude::*;
/// # let logger = Logger::new();
/// use rust_logger_core::fatal;
/// fatal!(logger, die = false, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, die = $die:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.fatal(format!($($arg)+), $die)
    }};
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::Log as _;
        $logger.fatal(format!($($arg)+), true)
    }};
}
