//! Unified error type for the Basement SDK.

use basement_protocol::ProtocolError;
use basement_session::SessionError;
use basement_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// Calls to the platform never return this: their failures live inside
/// [`ApiResult`](basement_protocol::ApiResult). `SdkError` is what
/// construction and local misuse produce, and the `#[from]` impls let `?`
/// lift sub-crate errors (for example a failed
/// [`StateRecord::decode_state`](basement_protocol::StateRecord::decode_state))
/// into it.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The session couldn't be established (missing token, unsupported
    /// deployment mode, no runtime for the heartbeat).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A body couldn't be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A transport-level failure surfaced outside a call.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A modal was requested while not running inside the platform.
    #[error("cannot use modals outside an embedded context (deployment mode is {0:?})")]
    ModalOutsideEmbedded(String),
}
