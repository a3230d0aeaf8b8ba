//! Access to the execution context the SDK was launched in.
//!
//! When a game runs inside the platform (or is opened by it), the session
//! token is handed over as the `token` query parameter of the launch URL.
//! Instead of reading some process-global location, the session manager is
//! given a [`ContextAccessor`] and asks it for query parameters. Tests pass
//! a [`QueryContext`] with fixed values; applications usually pass a
//! [`UrlContext`].

use url::Url;

use crate::SessionError;

/// Environment variable [`UrlContext::from_env`] reads the launch URL from.
pub const LAUNCH_URL_ENV: &str = "BASEMENT_LAUNCH_URL";

/// Reads query parameters from the current execution context.
pub trait ContextAccessor {
    /// Returns the first value of `key`, if present.
    fn query_param(&self, key: &str) -> Option<String>;
}

impl<T: ContextAccessor + ?Sized> ContextAccessor for &T {
    fn query_param(&self, key: &str) -> Option<String> {
        (**self).query_param(key)
    }
}

impl<T: ContextAccessor + ?Sized> ContextAccessor for Box<T> {
    fn query_param(&self, key: &str) -> Option<String> {
        (**self).query_param(key)
    }
}

// ---------------------------------------------------------------------------
// UrlContext
// ---------------------------------------------------------------------------

/// A context backed by the URL the game was launched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlContext {
    url: Url,
}

impl UrlContext {
    /// Parses a launch URL.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidContextUrl`] if `url` isn't a valid
    /// absolute URL.
    pub fn parse(url: &str) -> Result<Self, SessionError> {
        let parsed = Url::parse(url).map_err(|source| SessionError::InvalidContextUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self { url: parsed })
    }

    /// Reads the launch URL from the [`LAUNCH_URL_ENV`] environment variable.
    ///
    /// # Errors
    /// Returns [`SessionError::MissingLaunchUrl`] if the variable is unset,
    /// or [`SessionError::InvalidContextUrl`] if it doesn't parse.
    pub fn from_env() -> Result<Self, SessionError> {
        let url = std::env::var(LAUNCH_URL_ENV)
            .map_err(|_| SessionError::MissingLaunchUrl(LAUNCH_URL_ENV))?;
        Self::parse(&url)
    }

    /// The parsed launch URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ContextAccessor for UrlContext {
    fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

// ---------------------------------------------------------------------------
// QueryContext / EmptyContext
// ---------------------------------------------------------------------------

/// A context with fixed query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    pairs: Vec<(String, String)>,
}

impl QueryContext {
    /// Creates a context from `(key, value)` pairs, in order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Shorthand for a context carrying only a `token` parameter.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::from_pairs([("token", token.into())])
    }
}

impl ContextAccessor for QueryContext {
    fn query_param(&self, key: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

/// A context with no query parameters at all (no launch URL).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyContext;

impl ContextAccessor for EmptyContext {
    fn query_param(&self, _key: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_context_reads_token_param() {
        let ctx = UrlContext::parse("https://game.example/play?token=abc.def.ghi&lang=en").unwrap();
        assert_eq!(ctx.query_param("token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(ctx.query_param("lang").as_deref(), Some("en"));
        assert!(ctx.query_param("missing").is_none());
    }

    #[test]
    fn test_url_context_returns_first_of_repeated_keys() {
        let ctx = UrlContext::parse("https://game.example/?token=first&token=second").unwrap();
        assert_eq!(ctx.query_param("token").as_deref(), Some("first"));
    }

    #[test]
    fn test_url_context_decodes_percent_encoding() {
        let ctx = UrlContext::parse("https://game.example/?token=a%2Bb%3D").unwrap();
        assert_eq!(ctx.query_param("token").as_deref(), Some("a+b="));
    }

    #[test]
    fn test_url_context_invalid_url_returns_error() {
        let result = UrlContext::parse("not a url");
        assert!(matches!(
            result,
            Err(SessionError::InvalidContextUrl { ref url, .. }) if url == "not a url"
        ));
    }

    #[test]
    fn test_query_context_lookup() {
        let ctx = QueryContext::from_pairs([("a", "1"), ("token", "t"), ("a", "2")]);
        assert_eq!(ctx.query_param("a").as_deref(), Some("1"));
        assert_eq!(ctx.query_param("token").as_deref(), Some("t"));
        assert_eq!(QueryContext::with_token("x").query_param("token").as_deref(), Some("x"));
    }

    #[test]
    fn test_empty_context_has_nothing() {
        assert!(EmptyContext.query_param("token").is_none());
    }

    #[test]
    fn test_reference_and_box_forward() {
        let ctx = QueryContext::with_token("t");
        let by_ref: &dyn ContextAccessor = &ctx;
        assert_eq!(by_ref.query_param("token").as_deref(), Some("t"));

        let boxed: Box<dyn ContextAccessor> = Box::new(ctx.clone());
        assert_eq!(boxed.query_param("token").as_deref(), Some("t"));
    }
}
