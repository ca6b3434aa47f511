//! Error types for the outage agent

use thiserror::Error;

/// Shared error type for outage agent operations outside the cache itself
#[derive(Debug, Error)]
pub enum OutageError {
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OutageError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, OutageError>;
