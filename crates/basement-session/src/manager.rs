//! The session manager: turns configuration into an established session.
//!
//! Token resolution is a small state machine that runs exactly once, when
//! the SDK is constructed:
//!
//! ```text
//!           ┌─ overwrite_jwt set ─────────────────────────→ [Resolved]
//! [Start] ──┤
//!           └─ otherwise: check mode ─┬─ embedded/external ─→ lookup `token`
//!                                     │                          │
//!                                     │            found ───────→ [Resolved]
//!                                     │            missing/empty → TokenNotFound
//!                                     └─ anything else ───────→ UnsupportedDeploymentMode
//! ```
//!
//! An override token wins before the mode is even looked at. Once
//! resolved, an `external` session also gets a heartbeat whose first beat
//! fires one interval later.

use std::future::Future;

use basement_heartbeat::HeartbeatHandle;
use tracing::{debug, info};

use crate::{
    ContextAccessor, DeploymentMode, Session, SessionConfig, SessionError, SessionToken,
    TokenSource,
};

/// Name of the launch-context query parameter carrying the token.
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Resolves tokens and establishes sessions for one configuration.
#[derive(Debug, Clone)]
pub struct SessionManager {
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Runs the resolution state machine without starting anything.
    ///
    /// Returns the recognized mode (if any), the token, and where it came
    /// from.
    ///
    /// # Errors
    /// - [`SessionError::UnsupportedDeploymentMode`] when no override is set
    ///   and the mode is neither `embedded` nor `external`.
    /// - [`SessionError::TokenNotFound`] when no override is set and the
    ///   context has no non-empty `token` parameter.
    pub fn resolve<C>(
        &self,
        context: &C,
    ) -> Result<(Option<DeploymentMode>, SessionToken, TokenSource), SessionError>
    where
        C: ContextAccessor + ?Sized,
    {
        let raw_mode = self.config.deployment_mode.as_str();
        let mode = DeploymentMode::from_name(raw_mode);

        if let Some(token) = self.config.overwrite_jwt.as_deref().filter(|t| !t.is_empty()) {
            debug!(mode = raw_mode, "using override token");
            return Ok((mode, SessionToken::new(token), TokenSource::Override));
        }

        let mode = mode.ok_or_else(|| SessionError::UnsupportedDeploymentMode(raw_mode.to_string()))?;

        match context.query_param(TOKEN_QUERY_PARAM) {
            Some(token) if !token.is_empty() => {
                debug!(%mode, "token read from launch context");
                Ok((Some(mode), SessionToken::new(token), TokenSource::Context))
            }
            _ => Err(SessionError::TokenNotFound),
        }
    }

    /// Resolves the token and, in `external` mode, starts the heartbeat.
    ///
    /// `beat` is called with the session token once per heartbeat interval.
    /// Whatever it does (typically a `channelHeartbeat` call) runs in its
    /// own task and its outcome is ignored.
    ///
    /// # Errors
    /// Everything [`resolve`](Self::resolve) returns, plus
    /// [`SessionError::Heartbeat`] if an `external` session is established
    /// outside a Tokio runtime.
    pub fn establish<C, F, Fut>(&self, context: &C, beat: F) -> Result<Session, SessionError>
    where
        C: ContextAccessor + ?Sized,
        F: Fn(SessionToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (mode, token, source) = self.resolve(context)?;

        let heartbeat = if mode == Some(DeploymentMode::External) {
            let beat_token = token.clone();
            let handle = HeartbeatHandle::spawn(self.config.heartbeat.clone(), move || {
                beat(beat_token.clone())
            })?;
            Some(handle)
        } else {
            None
        };

        info!(
            mode = %self.config.deployment_mode,
            source = ?source,
            heartbeat = heartbeat.is_some(),
            "session established"
        );

        Ok(Session {
            deployment_mode: self.config.deployment_mode.clone(),
            mode,
            token,
            source,
            heartbeat,
        })
    }
}
