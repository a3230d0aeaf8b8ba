//! HTTP transport implementation using `reqwest`.

use basement_protocol::{
    ApiError, ApiResult, Codec, HttpMethod, JsonCodec, SERVICE_METHOD_HEADER,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{Request, Transport, TransportError};

/// The platform's API host.
pub const DEFAULT_BASE_URL: &str = "https://api.basement.fun";

/// Log target for debug-mode diagnostics.
const DIAGNOSTIC_TARGET: &str = "basement::api";

/// A [`Transport`] that talks to the platform over HTTPS.
///
/// With `debug` enabled, failed calls are additionally logged at `error`
/// level under the `basement::api` target. Debug mode never changes what a
/// call returns.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    codec: JsonCodec,
    debug: bool,
}

impl HttpTransport {
    /// Creates a transport for the platform's API host.
    pub fn new(debug: bool) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, debug)
    }

    /// Creates a transport for another host.
    ///
    /// Used to point the SDK at a local mock backend in tests.
    pub fn with_base_url(base_url: impl Into<String>, debug: bool) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            codec: JsonCodec,
            debug,
        }
    }

    /// Replaces the underlying `reqwest` client (timeouts, proxies, ...).
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// The host every path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether debug-mode diagnostics are enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Builds the full URL; query pairs are appended, never merged.
    fn build_url(&self, request: &Request) -> Result<Url, TransportError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Sends the request and reads the whole body.
    async fn send(&self, request: &Request) -> Result<(reqwest::StatusCode, Vec<u8>), TransportError> {
        let url = self.build_url(request)?;
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(discriminator) = request.discriminator.as_deref().filter(|d| !d.is_empty()) {
            builder = builder.header(SERVICE_METHOD_HEADER, discriminator);
        }
        if let Some(payload) = &request.payload {
            builder = builder.body(self.codec.encode(payload)?);
        }

        let response = builder.send().await.map_err(TransportError::Request)?;
        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Body)?;
        Ok((status, body.to_vec()))
    }

    /// Turns a received response into the envelope.
    ///
    /// The body is parsed before the status is looked at, so an unparseable
    /// body is a `network_error` whatever the status was.
    fn normalize<T: DeserializeOwned>(&self, status: reqwest::StatusCode, body: &[u8]) -> ApiResult<T> {
        let parsed: Value = match self.codec.decode(body) {
            Ok(parsed) => parsed,
            Err(e) => return self.network_failure(e.into()),
        };

        if !status.is_success() {
            if self.debug {
                tracing::error!(
                    target: DIAGNOSTIC_TARGET,
                    status = status.as_u16(),
                    body = %parsed,
                    "API error"
                );
            }
            return ApiResult::Failure(ApiError::from_error_body(&parsed));
        }

        match self.codec.narrow(parsed) {
            Ok(data) => ApiResult::Success { data },
            Err(e) => self.network_failure(e.into()),
        }
    }

    fn network_failure<T>(&self, err: TransportError) -> ApiResult<T> {
        if self.debug {
            tracing::error!(target: DIAGNOSTIC_TARGET, error = %err, "SDK error");
        }
        ApiResult::Failure(err.into())
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Transport for HttpTransport {
    async fn execute<T>(&self, request: Request) -> ApiResult<T>
    where
        T: DeserializeOwned + Send,
    {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            discriminator = request.discriminator.as_deref().unwrap_or(""),
            "sending request"
        );

        match self.send(&request).await {
            Ok((status, body)) => self.normalize(status, &body),
            Err(e) => self.network_failure(e),
        }
    }
}
