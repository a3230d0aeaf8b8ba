//! SDK configuration.

use basement_session::DeploymentMode;
use serde::{Deserialize, Serialize};

/// What a game passes when creating the SDK.
///
/// Deserializes from the same camelCase keys the platform's documentation
/// uses:
///
/// ```rust
/// let config: basement::SdkConfig = serde_json::from_str(
///     r#"{ "deploymentMode": "external", "debug": true }"#,
/// ).unwrap();
/// assert!(config.debug);
/// assert!(config.overwrite_jwt.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    /// `"embedded"` or `"external"`. Kept as a string so a typo is reported
    /// as an unsupported mode at construction instead of a parse error.
    pub deployment_mode: String,

    /// Log failed calls at `error` level (target `basement::api`).
    #[serde(default)]
    pub debug: bool,

    /// Use this token instead of reading one from the launch context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite_jwt: Option<String>,
}

impl SdkConfig {
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            deployment_mode: mode.into(),
            debug: false,
            overwrite_jwt: None,
        }
    }
}

/// Defaults to `embedded`, the mode a game runs in inside the launcher.
impl Default for SdkConfig {
    fn default() -> Self {
        Self::new(DeploymentMode::Embedded)
    }
}
