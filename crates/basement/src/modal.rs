//! Modal requests to the hosting launcher page.
//!
//! An embedded game can ask the launcher to open its tip and trade dialogs.
//! These are one-way messages on the cross-document channel: nothing comes
//! back, so they live outside the `ApiResult` model.

use serde::Serialize;

/// A message posted to the host page.
///
/// Serializes as `{ "type": "TIP_REQUEST", "data": { "walletToTip": .. } }`
/// and `{ "type": "TRADE_REQUEST", "data": { "otherWallet": .. } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostMessage {
    #[serde(rename_all = "camelCase")]
    TipRequest { wallet_to_tip: String },
    #[serde(rename_all = "camelCase")]
    TradeRequest { other_wallet: String },
}

/// The channel to the page hosting the game.
///
/// Delivery is fire-and-forget; implementations must not block.
pub trait HostMessenger: Send + Sync {
    fn post_message(&self, message: &HostMessage);
}

impl<F> HostMessenger for F
where
    F: Fn(&HostMessage) + Send + Sync,
{
    fn post_message(&self, message: &HostMessage) {
        self(message)
    }
}
