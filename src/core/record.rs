//! Immutable log record

use super::fields::{FieldValue, Fields};
use super::level::Level;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One logged event.
///
/// Built by a [`Logger`](super::logger::Logger) exactly once per accepted log
/// call and handed to handlers by reference; there is no way to modify it after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    level: Level,
    message: String,
    timestamp: DateTime<Utc>,
    logger_name: String,
    #[serde(skip_serializing_if = "Fields::is_empty")]
    fields: Fields,
    sequence: u64,
}

impl Record {
    pub(crate) fn new(
        level: Level,
        message: String,
        logger_name: &str,
        fields: Fields,
        sequence: u64,
    ) -> Self {
        Self {
            level,
            message,
            timestamp: Utc::now(),
            logger_name: logger_name.to_string(),
            fields,
            sequence,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Position of this record in its logger's emission order, starting at 0
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}
