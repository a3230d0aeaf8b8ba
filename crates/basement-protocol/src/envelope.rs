//! The result envelope every API call returns.
//!
//! Calls never fail with an `Err` past the call boundary. Network trouble,
//! HTTP error statuses and unparseable bodies are all folded into
//! [`ApiResult::Failure`] carrying an [`ApiError`] with a machine-readable
//! `code`. The caller decides what to do with it; nothing is retried.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// A failed call: either a code supplied by the server or one of the two
/// sentinel codes ([`ApiError::NETWORK_ERROR`], [`ApiError::UNKNOWN_ERROR`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// The call never reached the server, or its response couldn't be parsed.
    pub const NETWORK_ERROR: &'static str = "network_error";

    /// The server answered with an error status but no usable error code.
    pub const UNKNOWN_ERROR: &'static str = "unknown_error";

    /// Message used when a network failure carries no description.
    pub const DEFAULT_NETWORK_MESSAGE: &'static str = "A network error occurred";

    /// Message used when an error body carries no description.
    pub const DEFAULT_UNKNOWN_MESSAGE: &'static str = "An unknown error occurred";

    /// Creates an error with an explicit code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates a `network_error`, falling back to the generic message when
    /// `message` is empty.
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            Self::DEFAULT_NETWORK_MESSAGE.to_string()
        } else {
            message
        };
        Self::new(Self::NETWORK_ERROR, message)
    }

    /// Builds the error for a non-success response from its parsed body.
    ///
    /// The expected shape is `{ "error": { "code": "...", "message": "..." } }`.
    /// Every part is optional: a missing, empty or non-string `code` becomes
    /// `unknown_error`, and the same goes for `message` with the generic
    /// fallback text.
    pub fn from_error_body(body: &Value) -> Self {
        let field = |name: &str| {
            body.get("error")
                .and_then(|e| e.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            code: field("code").unwrap_or_else(|| Self::UNKNOWN_ERROR.to_string()),
            message: field("message")
                .unwrap_or_else(|| Self::DEFAULT_UNKNOWN_MESSAGE.to_string()),
        }
    }

    /// Returns `true` for the `network_error` sentinel.
    pub fn is_network(&self) -> bool {
        self.code == Self::NETWORK_ERROR
    }

    /// Returns `true` for the `unknown_error` sentinel.
    pub fn is_unknown(&self) -> bool {
        self.code == Self::UNKNOWN_ERROR
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ---------------------------------------------------------------------------
// ApiResult
// ---------------------------------------------------------------------------

/// Outcome of a single API call.
///
/// Exactly one variant is produced per call. On the wire-compatible JSON
/// form (used for logging and the demo output) this serializes as
/// `{"success": true, "data": ...}` or
/// `{"success": false, "error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    /// The server answered with a success status.
    Success {
        /// The parsed response body.
        data: T,
    },
    /// The call failed; see [`ApiError`] for the code taxonomy.
    Failure(ApiError),
}

impl<T> ApiResult<T> {
    /// Wraps a successful payload.
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    /// Returns `true` for [`ApiResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` for [`ApiResult::Failure`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Borrows the payload of a success.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Borrows the error of a failure.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Maps the success payload, leaving failures untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Success { data } => ApiResult::Success { data: f(data) },
            Self::Failure(err) => ApiResult::Failure(err),
        }
    }

    /// Converts the envelope into a standard `Result` so callers can use `?`.
    ///
    /// # Errors
    /// Returns the [`ApiError`] of a failure.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure(err) => Err(err),
        }
    }
}

impl<T> From<ApiResult<T>> for Result<T, ApiError> {
    fn from(result: ApiResult<T>) -> Self {
        result.into_result()
    }
}

impl<T> From<ApiError> for ApiResult<T> {
    fn from(err: ApiError) -> Self {
        Self::Failure(err)
    }
}

impl<T: Serialize> Serialize for ApiResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("ApiResult", 2)?;
        match self {
            Self::Success { data } => {
                st.serialize_field("success", &true)?;
                st.serialize_field("data", data)?;
            }
            Self::Failure(err) => {
                st.serialize_field("success", &false)?;
                st.serialize_field("error", err)?;
            }
        }
        st.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_error_body_full_body_uses_server_values() {
        let err = ApiError::from_error_body(&json!({
            "error": { "code": "invalid_jwt", "message": "JWT expired" }
        }));
        assert_eq!(err, ApiError::new("invalid_jwt", "JWT expired"));
    }

    #[test]
    fn test_from_error_body_missing_error_uses_defaults() {
        let err = ApiError::from_error_body(&json!({ "status": 500 }));
        assert!(err.is_unknown());
        assert_eq!(err.message, ApiError::DEFAULT_UNKNOWN_MESSAGE);
    }

    #[test]
    fn test_from_error_body_partial_error_defaults_missing_field() {
        let err = ApiError::from_error_body(&json!({ "error": { "message": "nope" } }));
        assert_eq!(err.code, ApiError::UNKNOWN_ERROR);
        assert_eq!(err.message, "nope");

        let err = ApiError::from_error_body(&json!({ "error": { "code": "rate_limited" } }));
        assert_eq!(err.code, "rate_limited");
        assert_eq!(err.message, ApiError::DEFAULT_UNKNOWN_MESSAGE);
    }

    #[test]
    fn test_from_error_body_empty_or_non_string_fields_use_defaults() {
        let err = ApiError::from_error_body(&json!({ "error": { "code": "", "message": 42 } }));
        assert_eq!(err.code, ApiError::UNKNOWN_ERROR);
        assert_eq!(err.message, ApiError::DEFAULT_UNKNOWN_MESSAGE);
    }

    #[test]
    fn test_from_error_body_non_object_body_uses_defaults() {
        let err = ApiError::from_error_body(&json!(["not", "an", "object"]));
        assert!(err.is_unknown());
    }

    #[test]
    fn test_network_empty_message_uses_fallback() {
        let err = ApiError::network("");
        assert!(err.is_network());
        assert_eq!(err.message, ApiError::DEFAULT_NETWORK_MESSAGE);

        let err = ApiError::network("connection refused");
        assert_eq!(err.message, "connection refused");
    }

    #[test]
    fn test_into_result_maps_variants() {
        let ok: ApiResult<u32> = ApiResult::success(7);
        assert_eq!(ok.into_result().unwrap(), 7);

        let failed: ApiResult<u32> = ApiError::network("down").into();
        assert!(failed.into_result().unwrap_err().is_network());
    }

    #[test]
    fn test_map_keeps_failure_untouched() {
        let failed: ApiResult<u32> = ApiError::new("x", "y").into();
        let mapped = failed.map(|n| n * 2);
        assert_eq!(mapped.error().unwrap().code, "x");
    }

    #[test]
    fn test_serialize_success_matches_wire_shape() {
        let ok = ApiResult::success(json!({ "exists": true }));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "success": true, "data": { "exists": true } })
        );
    }

    #[test]
    fn test_serialize_failure_matches_wire_shape() {
        let failed: ApiResult<()> = ApiError::network("timeout").into();
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({
                "success": false,
                "error": { "code": "network_error", "message": "timeout" }
            })
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::new("invalid_jwt", "JWT expired");
        assert_eq!(err.to_string(), "invalid_jwt: JWT expired");
    }
}
