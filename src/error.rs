//! Error types for the clearnode client

use thiserror::Error;

/// Clearnode client error
#[derive(Debug, Error)]
pub enum ClearnodeError {
    /// Connection-level failure (refused, dropped, not open).
    /// Handled by the reconnect loop; only surfaced to callers whose
    /// request was in flight when the connection went away.
    #[error("transport error: {0}")]
    Transport(String),

    /// Authentication handshake failed. Terminal for the session;
    /// retry requires a full reconnect.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Signing failed. Requests are never sent unsigned or partially signed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// No response within the request timeout window.
    #[error("request {0} timed out")]
    RequestTimeout(u64),

    /// Explicit error payload from the clearnode, surfaced verbatim.
    #[error("server error: {0}")]
    Server(String),

    /// Missing required identity, endpoint, or counterparty configuration.
    /// Fails fast before any network I/O.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for clearnode operations
pub type Result<T> = std::result::Result<T, ClearnodeError>;
