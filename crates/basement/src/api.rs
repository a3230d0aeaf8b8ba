//! Typed wrappers for every platform operation.
//!
//! Each method only copies its arguments into a request body (or query
//! string) and hands it to the transport; routing comes from the
//! [`Operation`] catalog. Optional arguments that are `None` are left out
//! of the body entirely.

use basement_protocol::{
    ACTIVITIES_PATH, ApiResult, ChannelMessage, ChannelStatus, CustomActivityResult,
    HeartbeatAck, Leaderboard, LeaderboardPosition, MessageChannel, NewScore, NotificationKind,
    NotificationResult, Operation, Page, ProtocolError, RulesTrigger, SetStateResult,
    StateRecord, TriggerOptions, UnverifiedChannel, UserActivity, UserScores, VerifiedChannel,
};
use basement_transport::Transport;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::BasementSdk;

/// Request body under construction.
#[derive(Default)]
struct Body(Map<String, Value>);

impl Body {
    fn new() -> Self {
        Self::default()
    }

    fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    fn optional(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }
}

impl<T: Transport> BasementSdk<T> {
    // -----------------------------------------------------------------------
    // Channel
    // -----------------------------------------------------------------------

    /// Whether the player's channel is open and the player present.
    pub async fn get_channel_status(&self) -> ApiResult<ChannelStatus> {
        self.call(Operation::ChannelStatus, Body::new().0).await
    }

    /// Keeps an `external` session's channel alive. The SDK already calls
    /// this every minute in that mode.
    pub async fn channel_heartbeat(&self) -> ApiResult<HeartbeatAck> {
        self.call(Operation::ChannelHeartbeat, Body::new().0).await
    }

    /// Starts the wallet-signature flow for a player without a token.
    pub async fn create_unverified_channel(&self, wallet: &str) -> ApiResult<UnverifiedChannel> {
        let body = Body::new().field("wallet", wallet);
        self.call(Operation::CreateUnverifiedChannel, body.0).await
    }

    /// Completes the wallet-signature flow and returns a fresh token.
    pub async fn verify_unverified_channel(
        &self,
        channel_id: &str,
        signature: &str,
        chain_id: Option<u64>,
    ) -> ApiResult<VerifiedChannel> {
        let body = Body::new()
            .field("channelId", channel_id)
            .field("signature", signature)
            .optional("chainId", chain_id);
        self.call(Operation::VerifyUnverifiedChannel, body.0).await
    }

    // -----------------------------------------------------------------------
    // Notifications and activities
    // -----------------------------------------------------------------------

    pub async fn send_notification(
        &self,
        message: &str,
        kind: NotificationKind,
    ) -> ApiResult<NotificationResult> {
        let body = Body::new()
            .field("message", message)
            .field("type", kind.as_str());
        self.call(Operation::SendNotification, body.0).await
    }

    /// Lists a wallet's activities. Public: no token is sent.
    pub async fn get_user_activities(
        &self,
        wallet_address: &str,
        kind: &str,
        page_size: u32,
        page_number: u32,
    ) -> ApiResult<Vec<UserActivity>> {
        let page_size = page_size.to_string();
        let page_number = page_number.to_string();
        self.transport
            .get(
                ACTIVITIES_PATH,
                &[
                    ("pageSize", page_size.as_str()),
                    ("pageNumber", page_number.as_str()),
                    ("walletAddress", wallet_address),
                    ("type", kind),
                ],
            )
            .await
    }

    pub async fn send_custom_activity(
        &self,
        label: &str,
        event_id: &str,
    ) -> ApiResult<CustomActivityResult> {
        let body = Body::new().field("label", label).field("eventId", event_id);
        self.call(Operation::SendCustomActivity, body.0).await
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    /// Fetches stored state documents, optionally filtered by label.
    ///
    /// Use [`StateRecord::decode_state`] to get the document back as a
    /// typed value.
    pub async fn get_state(
        &self,
        label: Option<&str>,
        limit: Option<u32>,
        skip: Option<u32>,
    ) -> ApiResult<Vec<StateRecord>> {
        let body = Body::new()
            .optional("label", label)
            .optional("limit", limit)
            .optional("skip", skip);
        self.call(Operation::GetState, body.0).await
    }

    /// Stores `state` under `label`.
    ///
    /// The document is sent JSON-encoded as a string, which is how the
    /// platform stores it. If `state` can't be serialized nothing is sent
    /// and the call fails with `unknown_error`.
    pub async fn set_state<S>(&self, label: &str, state: &S) -> ApiResult<SetStateResult>
    where
        S: Serialize + ?Sized,
    {
        let encoded = match serde_json::to_string(state) {
            Ok(encoded) => encoded,
            Err(err) => return self.local_failure(Operation::SetState, ProtocolError::Encode(err)),
        };
        let body = Body::new().field("label", label).field("state", encoded);
        self.call(Operation::SetState, body.0).await
    }

    // -----------------------------------------------------------------------
    // Scores and leaderboards
    // -----------------------------------------------------------------------

    /// A page of a game's leaderboard. Public: no token is sent.
    pub async fn get_leaderboard(&self, game_id: &str, limit: u32, skip: u32) -> ApiResult<Leaderboard> {
        let body = Body::new()
            .field("gameId", game_id)
            .field("limit", limit)
            .field("skip", skip);
        self.call(Operation::GetLeaderboard, body.0).await
    }

    /// A wallet's rank on a game's leaderboard. Public: no token is sent.
    pub async fn get_user_leaderboard_position(
        &self,
        game_id: &str,
        wallet: &str,
    ) -> ApiResult<LeaderboardPosition> {
        let body = Body::new().field("gameId", game_id).field("wallet", wallet);
        self.call(Operation::GetUserLeaderboardPosition, body.0).await
    }

    pub async fn get_user_scores(
        &self,
        limit: u32,
        skip: u32,
        nonce: Option<&str>,
    ) -> ApiResult<UserScores> {
        let body = Body::new()
            .field("limit", limit)
            .field("skip", skip)
            .optional("nonce", nonce);
        self.call(Operation::GetUserScores, body.0).await
    }

    /// Records a score. `nonce` identifies the run the score belongs to.
    pub async fn set_user_score(&self, score: f64, nonce: &str) -> ApiResult<NewScore> {
        let body = Body::new().field("score", score).field("nonce", nonce);
        self.call(Operation::SetUserScore, body.0).await
    }

    // -----------------------------------------------------------------------
    // Rules engine
    // -----------------------------------------------------------------------

    /// Fires a rules-engine trigger. Set fields of `options` are sent next
    /// to `trigger` at the top level of the body.
    pub async fn trigger_rules_engine(
        &self,
        trigger: &str,
        options: &TriggerOptions,
    ) -> ApiResult<RulesTrigger> {
        let mut body = Body::new().field("trigger", trigger);
        match serde_json::to_value(options) {
            Ok(Value::Object(fields)) => body.0.extend(fields),
            Ok(_) => {}
            Err(err) => {
                return self.local_failure(Operation::TriggerRulesEngine, ProtocolError::Encode(err));
            }
        }
        self.call(Operation::TriggerRulesEngine, body.0).await
    }

    // -----------------------------------------------------------------------
    // Messaging
    // -----------------------------------------------------------------------

    /// Opens a message channel between the player and `other_participants`.
    pub async fn create_message_channel(
        &self,
        other_participants: &[&str],
    ) -> ApiResult<MessageChannel> {
        let body = Body::new().field("otherParticipants", other_participants.to_vec());
        self.call(Operation::CreateMessageChannel, body.0).await
    }

    pub async fn get_message_channels(&self, limit: u32, skip: u32) -> ApiResult<Page<MessageChannel>> {
        let body = Body::new().field("limit", limit).field("skip", skip);
        self.call(Operation::GetMessageChannels, body.0).await
    }

    pub async fn get_channel_messages(
        &self,
        channel_id: &str,
        limit: u32,
        skip: u32,
    ) -> ApiResult<Page<ChannelMessage>> {
        let body = Body::new()
            .field("channelId", channel_id)
            .field("limit", limit)
            .field("skip", skip);
        self.call(Operation::GetChannelMessages, body.0).await
    }

    pub async fn send_channel_message(&self, channel_id: &str, content: &str) -> ApiResult<ChannelMessage> {
        let body = Body::new().field("channelId", channel_id).field("content", content);
        self.call(Operation::SendChannelMessage, body.0).await
    }

    pub async fn edit_channel_message(
        &self,
        message_id: &str,
        new_content: &str,
    ) -> ApiResult<ChannelMessage> {
        let body = Body::new()
            .field("messageId", message_id)
            .field("newContent", new_content);
        self.call(Operation::EditChannelMessage, body.0).await
    }

    /// Retracts a message the player sent.
    pub async fn unsend_channel_message(&self, message_id: &str) -> ApiResult<ChannelMessage> {
        let body = Body::new().field("messageId", message_id);
        self.call(Operation::UnsendChannelMessage, body.0).await
    }
}
