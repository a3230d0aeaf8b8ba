//! Payload shapes returned by the platform.
//!
//! These mirror what the backend sends; nothing here is validated beyond
//! what deserialization itself checks. Field names are camelCase on the
//! wire and document ids arrive as `_id`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Channel / session
// ---------------------------------------------------------------------------

/// Status of the player's launcher channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatus {
    pub exists: bool,
    pub present: bool,
    pub wallet: String,
    /// Milliseconds since the Unix epoch.
    pub opened_at: i64,
}

/// Acknowledgement of a heartbeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartbeatAck {
    pub success: bool,
}

/// A freshly created, not yet signed channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnverifiedChannel {
    /// Message the wallet has to sign to verify the channel.
    pub sign_request: String,
    pub channel_id: String,
}

/// Result of verifying a channel: a session token for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedChannel {
    pub jwt: String,
}

// ---------------------------------------------------------------------------
// Notifications and activities
// ---------------------------------------------------------------------------

/// Styling of a notification shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResult {
    pub success: bool,
}

/// The user an activity belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityUser {
    pub id: String,
    pub address: String,
    pub username: String,
}

/// One entry of a user's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub event_id: String,
    pub game_id: String,
    pub game_name: String,
    pub game_slug: String,
    pub user: ActivityUser,
    pub display_text: String,
    pub timestamp: i64,
}

/// The stored record of a custom activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomActivity {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    pub normalized_address: String,
    pub timestamp: i64,
    pub event_id: String,
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomActivityResult {
    pub success: bool,
    pub activity: CustomActivity,
}

// ---------------------------------------------------------------------------
// State storage
// ---------------------------------------------------------------------------

/// A labelled state blob stored for the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub game_id: String,
    pub ipfs_hash: String,
    pub normalized_address: String,
    pub label: String,
    pub updated_at: i64,
    /// The stored state.
    ///
    /// `setState` uploads the state as a JSON-encoded string, and depending
    /// on the endpoint it comes back either still encoded or already
    /// parsed. Use [`StateRecord::decode_state`] rather than reading this
    /// directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Value>,
}

impl StateRecord {
    /// Decodes the stored state into `T`.
    ///
    /// Returns `Ok(None)` when the record carries no state.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the state doesn't match `T`.
    pub fn decode_state<T: DeserializeOwned>(&self) -> Result<Option<T>, ProtocolError> {
        match &self.state {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(encoded)) => serde_json::from_str(encoded)
                .map(Some)
                .map_err(ProtocolError::Decode),
            Some(parsed) => serde_json::from_value(parsed.clone())
                .map(Some)
                .map_err(ProtocolError::Decode),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStateResult {
    pub success: bool,
    pub new_state: StateRecord,
}

// ---------------------------------------------------------------------------
// Scores and leaderboards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub nonce: String,
    pub game_id: String,
    pub normalized_address: String,
    pub score: f64,
    pub updated_at: i64,
    pub username: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// 1-based rank of a wallet in a game's leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardPosition {
    pub position: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserScore {
    pub score: f64,
    pub nonce: String,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserScores {
    pub scores: Vec<UserScore>,
}

/// Result of recording a score. The score document is passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScore {
    pub new_score: Value,
}

// ---------------------------------------------------------------------------
// Rules engine
// ---------------------------------------------------------------------------

/// Optional arguments of a rules-engine trigger.
///
/// Unset fields are left out of the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_wallet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_to_tip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_eth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_nftlayout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesTrigger {
    pub trigger_uuid: String,
    pub actions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Messaging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelParticipant {
    pub wallet: String,
    pub user_group: i64,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageChannel {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub chat_picture: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub participants: Vec<ChannelParticipant>,
    pub game_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelMessage {
    #[serde(rename = "_id")]
    pub id: String,
    pub channel_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
    pub data: Vec<T>,
}
