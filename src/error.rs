//! Error types
//!
//! Each layer has its own error: the store client reports `StoreError`,
//! transforms report `TransformError`, and `Cache` wraps both in `CacheError`.

use crate::protocol::RespError;
use thiserror::Error;

/// Failures talking to the external store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Socket-level failure (connect, read, write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store closed the connection before a full reply arrived
    #[error("connection closed by store")]
    ConnectionClosed,

    /// The reply bytes were not valid RESP2
    #[error("protocol error: {0}")]
    Protocol(#[from] RespError),

    /// The store answered with an error reply (-ERR ...)
    #[error("store replied with error: {0}")]
    Server(String),

    /// The reply was valid RESP2 but not what the command returns
    #[error("unexpected reply to {command}: {reply}")]
    UnexpectedReply { command: String, reply: String },
}

/// Failures converting retrieved bytes into a richer type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("value is not valid UTF-8")]
    InvalidUtf8,

    #[error("value {0:?} is not an integer")]
    InvalidInteger(String),

    #[error("value {0:?} is not a floating-point number")]
    InvalidFloat(String),

    #[error("{0}")]
    Custom(String),
}

impl From<std::str::Utf8Error> for TransformError {
    fn from(_: std::str::Utf8Error) -> Self {
        TransformError::InvalidUtf8
    }
}

impl From<std::string::FromUtf8Error> for TransformError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        TransformError::InvalidUtf8
    }
}

impl From<String> for TransformError {
    fn from(msg: String) -> Self {
        TransformError::Custom(msg)
    }
}

impl From<&str> for TransformError {
    fn from(msg: &str) -> Self {
        TransformError::Custom(msg.to_string())
    }
}

/// Errors surfaced by `Cache`
#[derive(Debug, Error)]
pub enum CacheError {
    /// The store could not be reached or refused the request; never retried
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The value under `key` exists but the transform rejected it
    #[error("failed to convert value stored under {key}: {source}")]
    RetrievalFailure {
        key: String,
        #[source]
        source: TransformError,
    },
}

impl CacheError {
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, CacheError::StoreUnavailable(_))
    }

    pub fn is_retrieval_failure(&self) -> bool {
        matches!(self, CacheError::RetrievalFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
