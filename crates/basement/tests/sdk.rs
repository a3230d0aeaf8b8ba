//! SDK tests against a recording transport.
//!
//! The transport stores every request it is handed and answers with a
//! canned body, so these tests check exactly what each SDK method sends
//! without any network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use basement::protocol::{HttpMethod, NotificationKind, TriggerOptions};
use basement::{
    ApiError, ApiResult, BasementSdk, DeploymentMode, EmptyContext, HostMessage, QueryContext,
    Request, SdkConfig, SdkError, SessionError, Transport,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

// =========================================================================
// Helpers
// =========================================================================

/// Records requests; replies with `reply` (or a fixed failure when unset).
#[derive(Clone, Default)]
struct RecordingTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    reply: Arc<Mutex<Option<Value>>>,
}

impl RecordingTransport {
    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> Request {
        self.requests().pop().expect("a request was sent")
    }

    fn reply_with(&self, body: Value) {
        *self.reply.lock().unwrap() = Some(body);
    }
}

impl Transport for RecordingTransport {
    async fn execute<T>(&self, request: Request) -> ApiResult<T>
    where
        T: DeserializeOwned + Send,
    {
        self.requests.lock().unwrap().push(request);
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Some(body) => match serde_json::from_value(body) {
                Ok(data) => ApiResult::success(data),
                Err(e) => ApiResult::Failure(ApiError::network(e.to_string())),
            },
            None => ApiResult::Failure(ApiError::new("recorded", "no reply configured")),
        }
    }
}

fn embedded_sdk() -> (BasementSdk<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::default();
    let sdk = BasementSdk::builder()
        .deployment_mode(DeploymentMode::Embedded)
        .overwrite_jwt("jwt-1")
        .build_with_transport(transport.clone())
        .expect("override token always resolves");
    (sdk, transport)
}

fn assert_launcher_call(req: &Request, discriminator: &str, body: Value) {
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.path, "/launcher/");
    assert_eq!(req.discriminator.as_deref(), Some(discriminator));
    assert_eq!(req.payload.as_ref(), Some(&body), "body of {discriminator}");
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn test_build_embedded_with_override_uses_token_without_heartbeat() {
    let sdk = BasementSdk::builder()
        .config(SdkConfig {
            deployment_mode: "embedded".into(),
            debug: false,
            overwrite_jwt: Some("abc".into()),
        })
        .build_with_transport(RecordingTransport::default())
        .unwrap();

    assert_eq!(sdk.jwt(), "abc");
    assert_eq!(sdk.deployment_mode(), Some(DeploymentMode::Embedded));
    assert!(!sdk.session().heartbeat_active());
}

#[test]
fn test_build_reads_token_from_context() {
    let sdk = BasementSdk::builder()
        .context(QueryContext::with_token("from-url"))
        .build_with_transport(RecordingTransport::default())
        .unwrap();

    assert_eq!(sdk.jwt(), "from-url");
}

#[tokio::test]
async fn test_build_external_without_token_fails_before_any_call() {
    let transport = RecordingTransport::default();

    let result = BasementSdk::builder()
        .deployment_mode("external")
        .context(EmptyContext)
        .build_with_transport(transport.clone());

    assert!(matches!(
        result,
        Err(SdkError::Session(SessionError::TokenNotFound))
    ));
    assert!(transport.requests().is_empty());
}

#[test]
fn test_build_unsupported_mode_fails_even_with_token() {
    let result = BasementSdk::builder()
        .deployment_mode("standalone")
        .context(QueryContext::with_token("jwt"))
        .build_with_transport(RecordingTransport::default());

    assert!(matches!(
        result,
        Err(SdkError::Session(SessionError::UnsupportedDeploymentMode(ref m))) if m == "standalone"
    ));
}

// =========================================================================
// Heartbeat
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_external_sdk_sends_heartbeat_every_minute() {
    let transport = RecordingTransport::default();
    let mut sdk = BasementSdk::builder()
        .deployment_mode(DeploymentMode::External)
        .context(QueryContext::with_token("jwt-ext"))
        .build_with_transport(transport.clone())
        .unwrap();

    assert!(sdk.session().heartbeat_active());
    assert!(transport.requests().is_empty(), "no call at construction");

    tokio::time::sleep(Duration::from_secs(59)).await;
    assert!(transport.requests().is_empty());

    tokio::time::sleep(Duration::from_secs(2)).await;
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_launcher_call(&requests[0], "channelHeartbeat", json!({ "launcherJwt": "jwt-ext" }));

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(transport.requests().len(), 3);

    sdk.shutdown();
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(transport.requests().len(), 3, "no beats after shutdown");
    assert_eq!(sdk.jwt(), "jwt-ext");
}

#[tokio::test(start_paused = true)]
async fn test_external_sdk_with_override_still_sends_heartbeat() {
    let transport = RecordingTransport::default();
    let _sdk = BasementSdk::builder()
        .deployment_mode("external")
        .overwrite_jwt("override")
        .build_with_transport(transport.clone())
        .unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_launcher_call(
        &transport.last(),
        "channelHeartbeat",
        json!({ "launcherJwt": "override" }),
    );
}

#[tokio::test(start_paused = true)]
async fn test_dropping_sdk_stops_heartbeat() {
    let transport = RecordingTransport::default();
    let sdk = BasementSdk::builder()
        .deployment_mode("external")
        .overwrite_jwt("t")
        .build_with_transport(transport.clone())
        .unwrap();
    drop(sdk);

    tokio::time::sleep(Duration::from_secs(300)).await;
    assert!(transport.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_embedded_sdk_never_sends_heartbeat() {
    let (_sdk, transport) = embedded_sdk();
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(transport.requests().is_empty());
}

// =========================================================================
// Endpoint routing and payloads
// =========================================================================

#[tokio::test]
async fn test_authorized_calls_carry_token_and_discriminator() {
    let (sdk, t) = embedded_sdk();

    let _ = sdk.get_channel_status().await;
    assert_launcher_call(&t.last(), "channelStatus", json!({ "launcherJwt": "jwt-1" }));

    let _ = sdk.channel_heartbeat().await;
    assert_launcher_call(&t.last(), "channelHeartbeat", json!({ "launcherJwt": "jwt-1" }));

    let _ = sdk.send_notification("hi", NotificationKind::Error).await;
    assert_launcher_call(
        &t.last(),
        "sendNotification",
        json!({ "launcherJwt": "jwt-1", "message": "hi", "type": "error" }),
    );

    let _ = sdk.send_custom_activity("won", "evt-1").await;
    assert_launcher_call(
        &t.last(),
        "sendCustomActivity",
        json!({ "launcherJwt": "jwt-1", "label": "won", "eventId": "evt-1" }),
    );

    let _ = sdk.get_user_scores(10, 5, Some("n-1")).await;
    assert_launcher_call(
        &t.last(),
        "getUserScores",
        json!({ "launcherJwt": "jwt-1", "limit": 10, "skip": 5, "nonce": "n-1" }),
    );

    let _ = sdk.set_user_score(100.0, "123").await;
    assert_launcher_call(
        &t.last(),
        "setUserScore",
        json!({ "launcherJwt": "jwt-1", "score": 100.0, "nonce": "123" }),
    );
}

#[tokio::test]
async fn test_messaging_calls_payloads() {
    let (sdk, t) = embedded_sdk();

    let _ = sdk.create_message_channel(&["0xa", "0xb"]).await;
    assert_launcher_call(
        &t.last(),
        "createMessageChannel",
        json!({ "launcherJwt": "jwt-1", "otherParticipants": ["0xa", "0xb"] }),
    );

    let _ = sdk.get_message_channels(20, 40).await;
    assert_launcher_call(
        &t.last(),
        "getMessageChannels",
        json!({ "launcherJwt": "jwt-1", "limit": 20, "skip": 40 }),
    );

    let _ = sdk.get_channel_messages("c-1", 50, 0).await;
    assert_launcher_call(
        &t.last(),
        "getChannelMessages",
        json!({ "launcherJwt": "jwt-1", "channelId": "c-1", "limit": 50, "skip": 0 }),
    );

    let _ = sdk.send_channel_message("c-1", "gg").await;
    assert_launcher_call(
        &t.last(),
        "sendChannelMessage",
        json!({ "launcherJwt": "jwt-1", "channelId": "c-1", "content": "gg" }),
    );

    let _ = sdk.edit_channel_message("m-1", "gg wp").await;
    assert_launcher_call(
        &t.last(),
        "editChannelMessage",
        json!({ "launcherJwt": "jwt-1", "messageId": "m-1", "newContent": "gg wp" }),
    );

    let _ = sdk.unsend_channel_message("m-1").await;
    assert_launcher_call(
        &t.last(),
        "unsendChannelMessage",
        json!({ "launcherJwt": "jwt-1", "messageId": "m-1" }),
    );
}

#[tokio::test]
async fn test_public_calls_omit_token() {
    let (sdk, t) = embedded_sdk();

    let _ = sdk.get_leaderboard("game-1", 10, 0).await;
    let req = t.last();
    assert_eq!(req.path, "/scores/");
    assert_eq!(req.discriminator.as_deref(), Some("getGameScoresLeaderboard"));
    assert_eq!(req.payload, Some(json!({ "gameId": "game-1", "limit": 10, "skip": 0 })));

    let _ = sdk.get_user_leaderboard_position("game-1", "0xabc").await;
    assert_launcher_call(
        &t.last(),
        "getUsersPositionInGameScoreLeaderboard",
        json!({ "gameId": "game-1", "wallet": "0xabc" }),
    );

    let _ = sdk.create_unverified_channel("0xabc").await;
    assert_launcher_call(&t.last(), "createUnverifiedChannel", json!({ "wallet": "0xabc" }));

    let _ = sdk.verify_unverified_channel("c-1", "0xsig", Some(8453)).await;
    assert_launcher_call(
        &t.last(),
        "verifyUnverifiedChannel",
        json!({ "channelId": "c-1", "signature": "0xsig", "chainId": 8453 }),
    );
}

#[tokio::test]
async fn test_user_activities_is_get_with_ordered_query() {
    let (sdk, t) = embedded_sdk();

    let _ = sdk.get_user_activities("0xabc", "all", 25, 2).await;

    let req = t.last();
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.path, "/activities");
    assert!(req.discriminator.is_none());
    assert!(req.payload.is_none());
    let query: Vec<(&str, &str)> = req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    assert_eq!(
        query,
        vec![("pageSize", "25"), ("pageNumber", "2"), ("walletAddress", "0xabc"), ("type", "all")]
    );
}

#[tokio::test]
async fn test_optional_arguments_are_omitted() {
    let (sdk, t) = embedded_sdk();

    let _ = sdk.get_state(None, None, None).await;
    assert_launcher_call(&t.last(), "getState", json!({ "launcherJwt": "jwt-1" }));

    let _ = sdk.get_state(Some("save"), Some(5), None).await;
    assert_launcher_call(
        &t.last(),
        "getState",
        json!({ "launcherJwt": "jwt-1", "label": "save", "limit": 5 }),
    );

    let _ = sdk.get_user_scores(1, 0, None).await;
    assert_launcher_call(
        &t.last(),
        "getUserScores",
        json!({ "launcherJwt": "jwt-1", "limit": 1, "skip": 0 }),
    );

    let _ = sdk.verify_unverified_channel("c-1", "0xsig", None).await;
    assert_launcher_call(
        &t.last(),
        "verifyUnverifiedChannel",
        json!({ "channelId": "c-1", "signature": "0xsig" }),
    );
}

#[tokio::test]
async fn test_set_state_sends_state_as_json_string() {
    let (sdk, t) = embedded_sdk();

    let _ = sdk.set_state("sdk-test", &json!({ "test": "test", "a": [1, 2, 3] })).await;

    let req = t.last();
    let body = req.payload.expect("POST carries a body");
    assert_eq!(body["launcherJwt"], "jwt-1");
    assert_eq!(body["label"], "sdk-test");
    let encoded = body["state"].as_str().expect("state is sent as a string");
    let decoded: Value = serde_json::from_str(encoded).unwrap();
    assert_eq!(decoded, json!({ "test": "test", "a": [1, 2, 3] }));
}

#[tokio::test]
async fn test_set_state_unencodable_fails_without_request() {
    let (sdk, t) = embedded_sdk();
    let mut state = HashMap::new();
    state.insert((1, 2), "tuple keys can't be JSON object keys");

    let result = sdk.set_state("bad", &state).await;

    assert_eq!(result.error().map(|e| e.code.as_str()), Some(ApiError::UNKNOWN_ERROR));
    assert!(t.requests().is_empty());
}

#[tokio::test]
async fn test_trigger_rules_engine_flattens_options() {
    let (sdk, t) = embedded_sdk();
    let options = TriggerOptions {
        nonce: Some("n".into()),
        wallet_to_tip: Some("0xtip".into()),
        chain_id: Some(1),
        ..Default::default()
    };

    let _ = sdk.trigger_rules_engine("level-complete", &options).await;

    assert_launcher_call(
        &t.last(),
        "triggerRulesEngine",
        json!({
            "launcherJwt": "jwt-1",
            "trigger": "level-complete",
            "nonce": "n",
            "walletToTip": "0xtip",
            "chainId": 1
        }),
    );
}

#[tokio::test]
async fn test_reply_is_narrowed_to_declared_type() {
    let (sdk, t) = embedded_sdk();
    t.reply_with(json!({ "exists": true, "present": true, "wallet": "0xabc", "openedAt": 7 }));

    let status = sdk.get_channel_status().await.into_result().unwrap();
    assert!(status.exists);
    assert_eq!(status.opened_at, 7);

    t.reply_with(json!({ "unexpected": true }));
    let result = sdk.get_channel_status().await;
    assert!(result.error().unwrap().is_network());
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let (sdk, t) = embedded_sdk();

    let calls = (0..5).map(|i| {
        let sdk = &sdk;
        async move { sdk.send_custom_activity(&format!("label-{i}"), "e").await }
    });
    futures_util::future::join_all(calls).await;

    let mut labels: Vec<String> = t
        .requests()
        .iter()
        .map(|r| r.payload.as_ref().unwrap()["label"].as_str().unwrap().to_string())
        .collect();
    labels.sort();
    assert_eq!(labels, (0..5).map(|i| format!("label-{i}")).collect::<Vec<_>>());
}

// =========================================================================
// Modals
// =========================================================================

#[test]
fn test_modals_post_to_host_in_embedded_mode() {
    let posted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&posted);

    let sdk = BasementSdk::builder()
        .overwrite_jwt("t")
        .messenger(move |msg: &HostMessage| sink.lock().unwrap().push(msg.clone()))
        .build_with_transport(RecordingTransport::default())
        .unwrap();

    sdk.open_tip_modal("0xtip").unwrap();
    sdk.open_trade_modal("0xother").unwrap();

    assert_eq!(
        *posted.lock().unwrap(),
        vec![
            HostMessage::TipRequest { wallet_to_tip: "0xtip".into() },
            HostMessage::TradeRequest { other_wallet: "0xother".into() },
        ]
    );
}

#[test]
fn test_modals_without_messenger_are_noop() {
    let sdk = BasementSdk::builder()
        .overwrite_jwt("t")
        .build_with_transport(RecordingTransport::default())
        .unwrap();

    assert!(sdk.open_tip_modal("0xtip").is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_modals_outside_embedded_return_error() {
    let posted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&posted);

    let sdk = BasementSdk::builder()
        .deployment_mode("external")
        .overwrite_jwt("t")
        .messenger(move |msg: &HostMessage| sink.lock().unwrap().push(msg.clone()))
        .build_with_transport(RecordingTransport::default())
        .unwrap();

    assert!(matches!(
        sdk.open_trade_modal("0xother"),
        Err(SdkError::ModalOutsideEmbedded(ref m)) if m == "external"
    ));
    assert!(posted.lock().unwrap().is_empty());
}
