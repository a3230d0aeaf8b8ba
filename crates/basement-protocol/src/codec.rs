//! Codec trait and the JSON implementation used on the wire.
//!
//! The backend speaks JSON only, but the transport is written against the
//! [`Codec`] trait so request bodies and response parsing go through one
//! place. That is also where a malformed body becomes a [`ProtocolError`]
//! instead of a panic or a silently empty value.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::ProtocolError;

/// Encodes request bodies and decodes response bodies.
///
/// ## Trait bounds
///
/// - `Send + Sync` → the codec lives inside a transport that is shared
///   between concurrent calls and the heartbeat task.
/// - `'static` → it owns everything it needs.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or don't
    /// match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;

    /// Converts an already-parsed document into `T`.
    ///
    /// The transport parses every body into a [`Value`] first (so it can
    /// look at the `error` field of failures) and only then narrows
    /// successful bodies to the caller's type.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the document doesn't match `T`.
    fn narrow<T: DeserializeOwned>(&self, value: Value) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use basement_protocol::{Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&serde_json::json!({ "label": "save-1" })).unwrap();
/// let back: serde_json::Value = codec.decode(&bytes).unwrap();
/// assert_eq!(back["label"], "save-1");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    fn narrow<T: DeserializeOwned>(&self, value: Value) -> Result<T, ProtocolError> {
        serde_json::from_value(value).map_err(ProtocolError::Decode)
    }
}
