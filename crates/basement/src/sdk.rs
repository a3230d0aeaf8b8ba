//! `BasementSdk` builder and the SDK handle.
//!
//! This is the entry point for games. It ties the layers together:
//! context → session (token, heartbeat) → transport → typed calls.

use std::sync::Arc;

use basement_heartbeat::HeartbeatConfig;
use basement_protocol::{ApiError, ApiResult, HeartbeatAck, Operation, TOKEN_FIELD};
use basement_session::{
    ContextAccessor, DeploymentMode, EmptyContext, Session, SessionConfig, SessionManager,
    SessionToken,
};
use basement_transport::{HttpTransport, Transport};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::modal::{HostMessage, HostMessenger};
use crate::{SdkConfig, SdkError};

/// Builder for configuring and creating a [`BasementSdk`].
///
/// # Example
///
/// ```rust,no_run
/// use basement::prelude::*;
///
/// # async fn run() -> Result<(), SdkError> {
/// let sdk = BasementSdk::builder()
///     .deployment_mode(DeploymentMode::External)
///     .context(UrlContext::from_env()?)
///     .debug(true)
///     .build()?;
///
/// let status = sdk.get_channel_status().await;
/// # Ok(())
/// # }
/// ```
pub struct BasementSdkBuilder {
    config: SdkConfig,
    heartbeat: HeartbeatConfig,
    context: Box<dyn ContextAccessor + Send + Sync>,
    messenger: Option<Arc<dyn HostMessenger>>,
}

impl BasementSdkBuilder {
    /// Creates a builder with [`SdkConfig::default`] and no launch context.
    pub fn new() -> Self {
        Self {
            config: SdkConfig::default(),
            heartbeat: HeartbeatConfig::default(),
            context: Box::new(EmptyContext),
            messenger: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: SdkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn deployment_mode(mut self, mode: impl Into<String>) -> Self {
        self.config.deployment_mode = mode.into();
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Uses `token` instead of reading one from the launch context.
    pub fn overwrite_jwt(mut self, token: impl Into<String>) -> Self {
        self.config.overwrite_jwt = Some(token.into());
        self
    }

    /// Sets where the `token` launch parameter is read from.
    pub fn context(mut self, context: impl ContextAccessor + Send + Sync + 'static) -> Self {
        self.context = Box::new(context);
        self
    }

    /// Attaches the channel to the host page used by the modal calls.
    pub fn messenger(mut self, messenger: impl HostMessenger + 'static) -> Self {
        self.messenger = Some(Arc::new(messenger));
        self
    }

    /// Overrides the heartbeat timing (default: every 60 seconds).
    pub fn heartbeat(mut self, heartbeat: HeartbeatConfig) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    /// Builds an SDK that talks to the platform's API host.
    ///
    /// # Errors
    /// See [`build_with_transport`](Self::build_with_transport).
    pub fn build(self) -> Result<BasementSdk<HttpTransport>, SdkError> {
        let transport = HttpTransport::new(self.config.debug);
        self.build_with_transport(transport)
    }

    /// Builds an SDK on top of a custom transport.
    ///
    /// Resolves the session token and, in `external` mode, starts the
    /// heartbeat (first beat one interval from now). Nothing is sent over
    /// the network here.
    ///
    /// # Errors
    /// Returns [`SdkError::Session`] when no token can be resolved, the
    /// deployment mode is unsupported, or an `external` session is built
    /// outside a Tokio runtime.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<BasementSdk<T>, SdkError> {
        let debug = self.config.debug;
        let mut session_config = SessionConfig::new(self.config.deployment_mode)
            .with_heartbeat(self.heartbeat);
        session_config.overwrite_jwt = self.config.overwrite_jwt;

        let transport = Arc::new(transport);
        let beat_transport = Arc::clone(&transport);
        let session = SessionManager::new(session_config).establish(&*self.context, move |token| {
            send_heartbeat(Arc::clone(&beat_transport), token, debug)
        })?;

        Ok(BasementSdk {
            transport,
            session,
            messenger: self.messenger,
            debug,
        })
    }
}

impl Default for BasementSdkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One beat of the `external`-mode keep-alive. The outcome is only logged.
async fn send_heartbeat<T: Transport>(transport: Arc<T>, token: SessionToken, debug: bool) {
    let spec = Operation::ChannelHeartbeat.spec();
    let mut payload = Map::new();
    payload.insert(TOKEN_FIELD.to_string(), Value::from(token.as_str()));

    let result: ApiResult<HeartbeatAck> = transport
        .post(spec.path, spec.discriminator, Value::Object(payload))
        .await;

    match result.error() {
        Some(err) if debug => error!(
            target: "basement::api",
            code = %err.code,
            message = %err.message,
            "heartbeat failed"
        ),
        Some(err) => debug!(code = %err.code, "heartbeat failed"),
        None => debug!("heartbeat acknowledged"),
    }
}

/// A configured SDK bound to one player session.
///
/// Every platform call is an `async` method returning
/// [`ApiResult`]; none of them panics or returns `Err` for network, HTTP
/// or parse failures. Calls are independent and may run concurrently.
///
/// Dropping the SDK (or calling [`shutdown`](Self::shutdown)) stops the
/// `external`-mode heartbeat.
pub struct BasementSdk<T: Transport = HttpTransport> {
    pub(crate) transport: Arc<T>,
    pub(crate) session: Session,
    messenger: Option<Arc<dyn HostMessenger>>,
    debug: bool,
}

impl BasementSdk<HttpTransport> {
    /// Creates a builder.
    pub fn builder() -> BasementSdkBuilder {
        BasementSdkBuilder::new()
    }

    /// Creates an SDK from `config`, reading the token from `context`.
    ///
    /// # Errors
    /// See [`BasementSdkBuilder::build_with_transport`].
    pub fn new(
        config: SdkConfig,
        context: impl ContextAccessor + Send + Sync + 'static,
    ) -> Result<Self, SdkError> {
        BasementSdkBuilder::new().config(config).context(context).build()
    }
}

impl<T: Transport> BasementSdk<T> {
    /// The token sent with every authorized call.
    pub fn jwt(&self) -> &str {
        self.session.token().as_str()
    }

    pub fn token(&self) -> &SessionToken {
        self.session.token()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn deployment_mode(&self) -> Option<DeploymentMode> {
        self.session.mode()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Stops the heartbeat. Calls keep working with the same token.
    pub fn shutdown(&mut self) {
        self.session.end();
    }

    /// Asks the launcher to open its tip dialog for `wallet_to_tip`.
    ///
    /// # Errors
    /// [`SdkError::ModalOutsideEmbedded`] unless the SDK runs in `embedded`
    /// mode. Without an attached messenger the call does nothing.
    pub fn open_tip_modal(&self, wallet_to_tip: &str) -> Result<(), SdkError> {
        self.post_to_host(HostMessage::TipRequest {
            wallet_to_tip: wallet_to_tip.to_string(),
        })
    }

    /// Asks the launcher to open its trade dialog with `other_wallet`.
    ///
    /// # Errors
    /// Same as [`open_tip_modal`](Self::open_tip_modal).
    pub fn open_trade_modal(&self, other_wallet: &str) -> Result<(), SdkError> {
        self.post_to_host(HostMessage::TradeRequest {
            other_wallet: other_wallet.to_string(),
        })
    }

    fn post_to_host(&self, message: HostMessage) -> Result<(), SdkError> {
        if !self.session.is_embedded() {
            return Err(SdkError::ModalOutsideEmbedded(
                self.session.deployment_mode_name().to_string(),
            ));
        }
        match &self.messenger {
            Some(messenger) => messenger.post_message(&message),
            None => debug!(?message, "no host page attached, modal request dropped"),
        }
        Ok(())
    }

    /// Sends `operation` with `fields` as its body, adding the session
    /// token when the operation requires it.
    pub(crate) async fn call<R>(&self, operation: Operation, mut fields: Map<String, Value>) -> ApiResult<R>
    where
        R: DeserializeOwned + Send,
    {
        let spec = operation.spec();
        if spec.requires_auth {
            fields.insert(TOKEN_FIELD.to_string(), Value::from(self.jwt()));
        }
        debug!(operation = %operation, "calling platform");
        self.transport
            .post(spec.path, spec.discriminator, Value::Object(fields))
            .await
    }

    /// A call that failed before anything was sent.
    pub(crate) fn local_failure<R>(&self, operation: Operation, err: impl std::fmt::Display) -> ApiResult<R> {
        if self.debug {
            error!(target: "basement::api", operation = %operation, error = %err, "request could not be built");
        }
        ApiResult::Failure(ApiError::new(ApiError::UNKNOWN_ERROR, err.to_string()))
    }
}

impl<T: Transport> std::fmt::Debug for BasementSdk<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasementSdk")
            .field("session", &self.session)
            .field("messenger", &self.messenger.is_some())
            .field("debug", &self.debug)
            .finish()
    }
}
