//! Console handler implementation

use crate::core::{format_fields, Handler, Level, Record, Result};
#[cfg(feature = "console")]
use colored::Colorize;

/// Default strftime pattern for console timestamps
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub struct ConsoleHandler {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    timestamp_format: String,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Colors are only applied when the `console` feature is enabled
    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set a strftime-compatible timestamp format
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logger_core::handlers::ConsoleHandler;
    ///
    /// let handler = ConsoleHandler::new()
    ///     .with_timestamp_format("%d/%b/%Y:%H:%M:%S %z");
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format_str: &str) -> Self {
        self.timestamp_format = format_str.to_string();
        self
    }

    /// Format as `[timestamp] [LEVEL] logger - message key=value...`
    pub fn format(&self, record: &Record) -> String {
        let timestamp = record.timestamp().format(&self.timestamp_format);
        let level = self.format_level(record.level());

        let logger_name = if record.logger_name().is_empty() {
            "root"
        } else {
            record.logger_name()
        };

        let base = format!(
            "[{}] [{}] {} - {}",
            timestamp,
            level,
            logger_name,
            record.message()
        );

        if record.fields().is_empty() {
            base
        } else {
            format!("{} {}", base, format_fields(record.fields()))
        }
    }

    #[cfg(feature = "console")]
    fn format_level(&self, level: &Level) -> String {
        let padded = format!("{:7}", level);
        if self.use_colors {
            padded.color(level.color_code()).to_string()
        } else {
            padded
        }
    }

    #[cfg(not(feature = "console"))]
    fn format_level(&self, level: &Level) -> String {
        format!("{:7}", level)
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn handle(&mut self, record: &Record) -> Result<()> {
        let output = self.format(record);

        // Route ERROR and above to stderr, others to stdout
        if *record.level() >= Level::ERROR {
            eprintln!("{}", output);
        } else {
            println!("{}", output);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
