//! Session types: what the SDK knows about the player it's acting for.
//!
//! A "session" is the SDK's record of one authenticated player. It tracks:
//! - HOW the SDK is deployed (`embedded` inside the platform or `external`)
//! - WHICH token authorizes calls on the player's behalf
//! - WHERE the token came from (explicit override or launch URL)
//! - WHETHER a heartbeat is keeping the session alive

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use basement_heartbeat::{HeartbeatConfig, HeartbeatHandle};

use crate::SessionError;

// ---------------------------------------------------------------------------
// DeploymentMode
// ---------------------------------------------------------------------------

/// How the game using the SDK is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentMode {
    /// Running inside the platform's launcher (iframe or webview).
    Embedded,
    /// Running standalone. Needs a heartbeat to keep the channel open.
    External,
}

impl DeploymentMode {
    /// The wire name of this mode, as used in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::External => "external",
        }
    }

    /// Looks up a mode by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "embedded" => Some(Self::Embedded),
            "external" => Some(Self::External),
            _ => None,
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SessionError::UnsupportedDeploymentMode(s.to_string()))
    }
}

impl From<DeploymentMode> for String {
    fn from(mode: DeploymentMode) -> Self {
        mode.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Inputs to session establishment.
///
/// The deployment mode is kept as the raw configured string rather than a
/// [`DeploymentMode`]: an unrecognized value is only an error when the
/// token actually has to be looked up, so it must survive until then.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Raw deployment mode name (`"embedded"` or `"external"`).
    pub deployment_mode: String,

    /// A token to use instead of reading one from the launch context.
    /// Empty strings count as "not set".
    pub overwrite_jwt: Option<String>,

    /// Timing of the `external`-mode heartbeat.
    pub heartbeat: HeartbeatConfig,
}

impl SessionConfig {
    /// Creates a config for `mode` with no override token and the default
    /// 60-second heartbeat.
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            deployment_mode: mode.into(),
            overwrite_jwt: None,
            heartbeat: HeartbeatConfig::default(),
        }
    }

    /// Sets the override token.
    pub fn with_overwrite_jwt(mut self, token: impl Into<String>) -> Self {
        self.overwrite_jwt = Some(token.into());
        self
    }

    /// Replaces the heartbeat configuration.
    pub fn with_heartbeat(mut self, heartbeat: HeartbeatConfig) -> Self {
        self.heartbeat = heartbeat;
        self
    }
}

// ---------------------------------------------------------------------------
// SessionToken
// ---------------------------------------------------------------------------

/// The bearer token (a JWT) that authorizes calls for the player.
///
/// Cloning is cheap (the string is reference counted), so the heartbeat
/// task can hold its own copy. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Arc<str>);

impl SessionToken {
    pub fn new(token: impl Into<Arc<str>>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} bytes>)", self.0.len())
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a session's token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// The configured `overwrite_jwt`.
    Override,
    /// The `token` query parameter of the launch context.
    Context,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An established session.
///
/// Created by [`SessionManager::establish`](crate::SessionManager::establish)
/// once a token is resolved. The token never changes for the lifetime of
/// the session. If the session runs in `external` mode it owns the
/// heartbeat, and ending or dropping the session stops it.
#[derive(Debug)]
pub struct Session {
    pub(crate) deployment_mode: String,
    pub(crate) mode: Option<DeploymentMode>,
    pub(crate) token: SessionToken,
    pub(crate) source: TokenSource,
    pub(crate) heartbeat: Option<HeartbeatHandle>,
}

impl Session {
    /// The token sent with every authorized call.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// The recognized deployment mode.
    ///
    /// `None` only when an override token let an unrecognized mode name
    /// through; see [`deployment_mode_name`](Self::deployment_mode_name).
    pub fn mode(&self) -> Option<DeploymentMode> {
        self.mode
    }

    /// The deployment mode exactly as configured.
    pub fn deployment_mode_name(&self) -> &str {
        &self.deployment_mode
    }

    pub fn is_embedded(&self) -> bool {
        self.mode == Some(DeploymentMode::Embedded)
    }

    pub fn token_source(&self) -> TokenSource {
        self.source
    }

    /// Whether a heartbeat is currently scheduled.
    pub fn heartbeat_active(&self) -> bool {
        self.heartbeat.as_ref().is_some_and(HeartbeatHandle::is_running)
    }

    /// Number of heartbeats fired so far (0 if there is no heartbeat).
    pub fn heartbeats_fired(&self) -> u64 {
        self.heartbeat.as_ref().map_or(0, HeartbeatHandle::beats_fired)
    }

    /// Stops the heartbeat, if any. The token stays usable.
    ///
    /// Calling this more than once is harmless.
    pub fn end(&mut self) {
        if let Some(heartbeat) = self.heartbeat.take() {
            heartbeat.stop();
            tracing::info!(mode = %self.deployment_mode, "session ended");
        }
    }
}
