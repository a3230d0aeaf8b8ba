//! Session management for the Basement SDK.
//!
//! This crate decides which token the SDK acts with and keeps standalone
//! sessions alive:
//!
//! 1. **Context access**: reading launch parameters ([`ContextAccessor`])
//! 2. **Token resolution**: override token or launch URL, validated
//!    against the deployment mode ([`SessionManager`])
//! 3. **Keep-alive**: a 60-second heartbeat for `external` sessions,
//!    owned by the [`Session`]
//!
//! # How it fits in the stack
//!
//! ```text
//! SDK facade (above)  ← establishes one session at construction time
//!     ↕
//! Session Layer (this crate)  ← token, mode, heartbeat lifetime
//!     ↕
//! Heartbeat (below)  ← fixed-interval background task
//! ```
//!
//! The crate does no I/O of its own: what a heartbeat actually sends is
//! supplied by the caller.

mod context;
mod error;
mod manager;
mod session;

pub use context::{ContextAccessor, EmptyContext, LAUNCH_URL_ENV, QueryContext, UrlContext};
pub use error::SessionError;
pub use manager::{SessionManager, TOKEN_QUERY_PARAM};
pub use session::{DeploymentMode, Session, SessionConfig, SessionToken, TokenSource};
