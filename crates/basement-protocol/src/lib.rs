//! Wire protocol for the Basement SDK.
//!
//! This crate defines what travels between the SDK and the platform:
//!
//! - **Envelope** ([`ApiResult`], [`ApiError`]): the normalized outcome of
//!   every call.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how bodies become bytes
//!   and back.
//! - **Catalog** ([`Operation`], [`OperationSpec`]): which path and
//!   `X-Service-Method` each logical operation uses.
//! - **Types**: the typed payloads the platform returns.
//!
//! It knows nothing about HTTP clients or sessions.
//!
//! ```text
//! Transport (HTTP) → Protocol (ApiResult<T>) → SDK (typed methods)
//! ```

mod catalog;
mod codec;
mod envelope;
mod error;
mod types;

pub use catalog::{
    ACTIVITIES_PATH, HttpMethod, LAUNCHER_PATH, Operation, OperationSpec, SCORES_PATH,
    SERVICE_METHOD_HEADER, TOKEN_FIELD,
};
pub use codec::{Codec, JsonCodec};
pub use envelope::{ApiError, ApiResult};
pub use error::ProtocolError;
pub use types::{
    ActivityUser, ChannelMessage, ChannelParticipant, ChannelStatus, CustomActivity,
    CustomActivityResult, HeartbeatAck, Leaderboard, LeaderboardEntry, LeaderboardPosition,
    MessageChannel, NewScore, NotificationKind, NotificationResult, Page, RulesTrigger,
    SetStateResult, StateRecord, TriggerOptions, UnverifiedChannel, UserActivity, UserScore,
    UserScores, VerifiedChannel,
};
