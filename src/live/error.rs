use thiserror::Error;

use crate::transport::TransportError;

/// The initial load failed. Fatal to the session view; not retried.
#[derive(Debug, Error)]
#[error("Failed to load match {match_id}: {source}")]
pub struct FetchError {
    pub match_id: i64,
    #[source]
    pub source: TransportError,
}

/// A command failed. Returned to the caller, never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<TransportError> for CommandError {
    fn from(e: TransportError) -> Self {
        Self::new(e.to_string())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// A push subscription could not be established. Only ever surfaced as `connected = false`.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("Push connection failed: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Push source unavailable: {0}")]
    Unavailable(String),
}
