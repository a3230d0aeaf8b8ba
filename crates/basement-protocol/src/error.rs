//! Error types for the protocol layer.
//!
//! These are the errors of turning values into bytes and back. They never
//! reach an SDK caller directly: the transport folds them into an
//! [`ApiError`](crate::ApiError) with the `network_error` code, and the
//! state helpers surface them when a stored blob can't be decoded.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into JSON bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: an empty body, an HTML error page from a proxy,
    /// or a payload that doesn't match the declared shape.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
