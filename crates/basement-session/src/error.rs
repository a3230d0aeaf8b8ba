//! Error types for the session layer.

use basement_heartbeat::HeartbeatError;

/// Errors that prevent a session from being established.
///
/// All of these are configuration errors: they are raised once, while the
/// SDK is being constructed, and an SDK instance is never created after
/// one of them. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No override token was configured and the execution context has no
    /// (or an empty) `token` query parameter.
    #[error("token not found in URL parameters")]
    TokenNotFound,

    /// The configured deployment mode is neither `embedded` nor `external`.
    #[error("deployment mode {0:?} is not supported")]
    UnsupportedDeploymentMode(String),

    /// The launch URL handed to the context accessor couldn't be parsed.
    #[error("invalid launch url {url:?}: {source}")]
    InvalidContextUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The environment variable carrying the launch URL is not set.
    #[error("launch url not set: environment variable {0} is missing")]
    MissingLaunchUrl(&'static str),

    /// The heartbeat for an `external` session couldn't be started.
    #[error(transparent)]
    Heartbeat(#[from] HeartbeatError),
}
