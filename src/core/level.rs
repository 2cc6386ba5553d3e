//! Severity level definitions
//!
//! A [`Level`] is a named integer. Levels compare and test equal by `value`
//! only, so callers can interleave custom severities with the built-in set.

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    name: Cow<'static, str>,
    value: i32,
}

impl Level {
    /// Filter sentinel that lets every record through. Never emittable.
    pub const ALL: Level = Level::builtin("ALL", i32::MIN);
    pub const TRACE: Level = Level::builtin("TRACE", 500);
    pub const DEBUG: Level = Level::builtin("DEBUG", 700);
    pub const INFO: Level = Level::builtin("INFO", 800);
    pub const WARNING: Level = Level::builtin("WARNING", 900);
    pub const ERROR: Level = Level::builtin("ERROR", 1000);
    pub const FATAL: Level = Level::builtin("FATAL", 1200);
    /// Filter sentinel that blocks every record. Never emittable.
    pub const OFF: Level = Level::builtin("OFF", i32::MAX);

    const fn builtin(name: &'static str, value: i32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }

    /// Create a custom level
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_core::Level;
    ///
    /// let notice = Level::new("NOTICE", 850);
    /// assert!(notice > Level::INFO);
    /// assert!(notice < Level::WARNING);
    /// ```
    pub fn new(name: impl Into<Cow<'static, str>>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// `ALL` and `OFF` are thresholds only; records can't carry them.
    pub fn is_sentinel(&self) -> bool {
        *self == Level::ALL || *self == Level::OFF
    }

    /// Built-in levels that records can carry, lowest first
    pub fn builtins() -> [Level; 6] {
        [
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARNING,
            Level::ERROR,
            Level::FATAL,
        ]
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self.value {
            v if v >= Level::FATAL.value => BrightRed,
            v if v >= Level::ERROR.value => Red,
            v if v >= Level::WARNING.value => Yellow,
            v if v >= Level::INFO.value => Green,
            v if v >= Level::DEBUG.value => Blue,
            _ => BrightBlack,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(Level::ALL),
            "TRACE" => Ok(Level::TRACE),
            "DEBUG" => Ok(Level::DEBUG),
            "INFO" => Ok(Level::INFO),
            "WARN" | "WARNING" => Ok(Level::WARNING),
            "ERROR" => Ok(Level::ERROR),
            "FATAL" => Ok(Level::FATAL),
            "OFF" => Ok(Level::OFF),
            _ => Err(LoggerError::invalid_argument(
                "level",
                format!("unknown level name '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ordering() {
        assert!(Level::ALL < Level::TRACE);
        assert!(Level::TRACE < Level::DEBUG);
        assert!(Level::DEBUG < Level::INFO);
        assert!(Level::INFO < Level::WARNING);
        assert!(Level::WARNING < Level::ERROR);
        assert!(Level::ERROR < Level::FATAL);
        assert!(Level::FATAL < Level::OFF);
    }

    #[test]
    fn test_equality_ignores_name() {
        let renamed = Level::new("INFORMATION", Level::INFO.value());
        assert_eq!(renamed, Level::INFO);
        assert_eq!(renamed.name(), "INFORMATION");

        let fake_all = Level::new("everything", i32::MIN);
        assert!(fake_all.is_sentinel());
    }

    #[test]
    fn test_sentinels() {
        assert!(Level::ALL.is_sentinel());
        assert!(Level::OFF.is_sentinel());
        for level in Level::builtins() {
            assert!(!level.is_sentinel(), "{} should be emittable", level);
        }
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Level::default(), Level::INFO);
    }

    #[test]
    fn test_parse() {
        assert_eq!("warn".parse::<Level>().unwrap(), Level::WARNING);
        assert_eq!("Warning".parse::<Level>().unwrap(), Level::WARNING);
        assert_eq!(" off ".parse::<Level>().unwrap(), Level::OFF);
        assert_eq!("all".parse::<Level>().unwrap(), Level::ALL);

        let err = "loud".parse::<Level>().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:7}|", Level::INFO), "INFO   |");
        assert_eq!(Level::FATAL.to_string(), "FATAL");
    }
}
