//! Error types for the logger core

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Caller passed a value the operation does not accept
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// Handler rejected a record
    #[error("Handler '{handler}' failed: {message}")]
    HandlerFailed { handler: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Operation not allowed in the logger's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl LoggerError {
    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a handler failure error
    pub fn handler(handler: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HandlerFailed {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        LoggerError::InvalidState(msg.into())
    }

    /// Whether this error was caused by a rejected argument
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, LoggerError::InvalidArgument { .. })
    }

    /// Whether the logger refused the call in its current state
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, LoggerError::InvalidState(_))
    }
}
