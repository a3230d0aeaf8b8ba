use basement_protocol::{ApiError, ProtocolError};

/// Errors that can occur while performing a call.
///
/// These never leave the transport as `Err`: every one of them is turned
/// into an [`ApiError`] with the `network_error` code at the call boundary
/// (see the `From` impl below). The variants exist so the debug log can
/// say what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request URL couldn't be built from the base host and path.
    #[cfg(feature = "http")]
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[cfg(feature = "http")]
    #[error("{0}")]
    Request(#[source] reqwest::Error),

    /// The response body couldn't be read to the end.
    #[cfg(feature = "http")]
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The request body couldn't be encoded or the response body decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_folds_into_network_error() {
        let decode = serde_json::from_slice::<serde_json::Value>(b"<html>")
            .expect_err("not json");
        let err: ApiError = TransportError::Protocol(ProtocolError::Decode(decode)).into();
        assert!(err.is_network());
        assert!(err.message.starts_with("decode failed"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_invalid_url_folds_into_network_error() {
        let parse = url::Url::parse("not a url").expect_err("invalid");
        let err: ApiError = TransportError::from(parse).into();
        assert_eq!(err.code, ApiError::NETWORK_ERROR);
    }
}
