//! Transport abstraction layer for the Basement SDK.
//!
//! Provides the [`Transport`] trait the SDK talks to and the [`Request`]
//! descriptor it hands over. A transport performs exactly one call per
//! request and always answers with an [`ApiResult`]; it never returns a raw
//! error and knows nothing about sessions or tokens.
//!
//! # Feature Flags
//!
//! - `http` (default): [`HttpTransport`] via `reqwest`

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::{DEFAULT_BASE_URL, HttpTransport};

use std::future::Future;

use basement_protocol::{ApiResult, HttpMethod};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A single outbound call, fully described by the caller.
///
/// The transport only serializes it and builds headers from it; it never
/// rewrites any of the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: HttpMethod,
    /// Path relative to the API host, e.g. `/launcher/`.
    pub path: String,
    /// Routing discriminator sent as `X-Service-Method` when non-empty.
    pub discriminator: Option<String>,
    /// JSON body. Only sent for methods that carry one.
    pub payload: Option<Value>,
    /// Query parameters in caller order. Repeated keys are all sent.
    pub query: Vec<(String, String)>,
}

impl Request {
    /// Describes a GET with query parameters.
    pub fn get(path: impl Into<String>, query: &[(&str, &str)]) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            discriminator: None,
            payload: None,
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// Describes a POST with a JSON body routed by `discriminator`.
    pub fn post(path: impl Into<String>, discriminator: &str, payload: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            discriminator: (!discriminator.is_empty()).then(|| discriminator.to_string()),
            payload: Some(payload),
            query: Vec::new(),
        }
    }
}

/// Performs calls against the platform.
///
/// Only [`execute`](Self::execute) is required; [`get`](Self::get) and
/// [`post`](Self::post) build the [`Request`] for you.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → one transport is shared (behind an `Arc`)
///   between concurrent calls and the background heartbeat task.
/// - The returned futures are `Send` so they can be spawned on a
///   multi-threaded Tokio runtime.
pub trait Transport: Send + Sync + 'static {
    /// Performs the call and normalizes its outcome.
    ///
    /// Must never panic on network or parse failures; those become
    /// [`ApiResult::Failure`] with the `network_error` code.
    fn execute<T>(&self, request: Request) -> impl Future<Output = ApiResult<T>> + Send
    where
        T: DeserializeOwned + Send;

    /// Issues a GET to `path` with `query` appended in order.
    fn get<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = ApiResult<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        self.execute(Request::get(path, query))
    }

    /// Issues a POST to `path` with a JSON body.
    ///
    /// `discriminator` is sent as `X-Service-Method` unless empty.
    fn post<T>(
        &self,
        path: &str,
        discriminator: &str,
        payload: Value,
    ) -> impl Future<Output = ApiResult<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        self.execute(Request::post(path, discriminator, payload))
    }
}
