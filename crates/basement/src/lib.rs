//! # Basement
//!
//! Client SDK for the Basement game platform.
//!
//! A game creates one [`BasementSdk`] at startup. Construction resolves the
//! player's session token (from an explicit override or the `token` launch
//! parameter), and in `external` mode starts a heartbeat that tells the
//! platform the player is still there. After that every platform
//! operation is a typed `async` method returning an [`ApiResult`]:
//!
//! ```text
//! { success: true,  data }                    // 2xx
//! { success: false, error: { code, message } } // everything else
//! ```
//!
//! Calls never return `Err` and never panic for network, HTTP or parse
//! failures. Only construction (and modal misuse) can fail with
//! [`SdkError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use basement::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let sdk = BasementSdk::builder()
//!     .deployment_mode(DeploymentMode::Embedded)
//!     .overwrite_jwt("eyJhbGciOi...")
//!     .build()?;
//!
//! sdk.set_state("save-1", &serde_json::json!({ "level": 3 })).await;
//! for record in sdk.get_state(Some("save-1"), None, None).await.into_result()? {
//!     let doc: Option<serde_json::Value> = record.decode_state()?;
//!     println!("{doc:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod error;
mod modal;
mod sdk;

pub use config::SdkConfig;
pub use error::SdkError;
pub use modal::{HostMessage, HostMessenger};
pub use sdk::{BasementSdk, BasementSdkBuilder};

pub use basement_heartbeat::{HeartbeatConfig, MissedBeatPolicy};
pub use basement_protocol as protocol;
pub use basement_protocol::{ApiError, ApiResult};
pub use basement_session::{
    ContextAccessor, DeploymentMode, EmptyContext, QueryContext, SessionError, SessionToken,
    UrlContext,
};
pub use basement_transport::{HttpTransport, Request, Transport};

/// Everything a game usually needs, in one import.
pub mod prelude {
    pub use crate::{
        ApiError, ApiResult, BasementSdk, ContextAccessor, DeploymentMode, HostMessage,
        HostMessenger, QueryContext, SdkConfig, SdkError, UrlContext,
    };
    pub use basement_protocol::{NotificationKind, TriggerOptions};
}
