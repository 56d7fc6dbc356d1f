//! Error types for the tournament notifier

use thiserror::Error;

/// Result type alias for notifier operations
pub type Result<T> = std::result::Result<T, NotifierError>;

/// Errors that can occur while polling, persisting or notifying
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Transport-level HTTP failures (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote end answered with a non-success status
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: reqwest::StatusCode },

    /// I/O errors (state file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream returned JSON of an unexpected shape
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NotifierError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new unexpected payload error
    pub fn unexpected_payload(msg: impl Into<String>) -> Self {
        Self::UnexpectedPayload(msg.into())
    }
}

impl From<config::ConfigError> for NotifierError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
