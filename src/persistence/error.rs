//! Persistence error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding a stored state.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The stored value is not bytes or text
    #[error("Cannot decode state from {kind} value")]
    Unsupported { kind: &'static str },

    /// Stored bytes are not valid UTF-8
    #[error("State bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// JSON serialization or deserialization failed
    #[error("JSON state codec failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary serialization or deserialization failed
    #[error("Binary state codec failed: {0}")]
    Binary(#[from] bincode::Error),
}
