//! # Client Error Types
//!
//! Unified error handling for deckgen-client library and CLI operations.

use anyhow::Result;
use std::time::Duration;
use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Comprehensive error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Timeout waiting for operation: {operation} (waited {waited:?})")]
    Timeout { operation: String, waited: Duration },

    #[error("Invalid response for {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create an API error from an HTTP response status and body
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a poller timeout error
    ///
    /// This is a client-side synthetic error: the remote operation may still
    /// be running, the client has merely stopped waiting for it.
    pub fn timeout(operation: impl Into<String>, waited: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            waited,
        }
    }

    /// Create an invalid response error
    ///
    /// Use this when a 2xx response body does not match the contracted shape.
    pub fn invalid_response(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is recoverable (worth retrying by the caller)
    ///
    /// The client itself never retries; this classifier exists for callers
    /// that layer their own retry policy on top.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect(),
            ClientError::Timeout { .. } => true,
            ClientError::Api { status, .. } => *status >= 500,
            // A malformed 2xx body means the server is broken, not busy
            ClientError::InvalidResponse { .. } => false,
            _ => false,
        }
    }
}
