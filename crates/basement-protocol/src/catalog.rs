//! The endpoint catalog.
//!
//! The backend exposes most of its functionality through one generic
//! endpoint (`/launcher/`) and picks the handler from the
//! `X-Service-Method` header. Rather than repeating path and header strings
//! at every call site, each logical operation is an [`Operation`] and its
//! routing lives in one table ([`Operation::spec`]). The transport never
//! sees this table; it only receives the path and discriminator strings.

use std::fmt;

/// Request header naming the logical operation on a shared endpoint.
pub const SERVICE_METHOD_HEADER: &str = "X-Service-Method";

/// JSON field under which the session token travels in request bodies.
pub const TOKEN_FIELD: &str = "launcherJwt";

/// The generic endpoint most operations are routed through.
pub const LAUNCHER_PATH: &str = "/launcher/";

/// The leaderboard endpoint.
pub const SCORES_PATH: &str = "/scores/";

/// The RESTful activity listing.
pub const ACTIVITIES_PATH: &str = "/activities";

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Routing information for one logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path relative to the API host.
    pub path: &'static str,
    /// Value of the `X-Service-Method` header. Empty for RESTful GETs.
    pub discriminator: &'static str,
    /// Whether the session token must be copied into the payload.
    pub requires_auth: bool,
}

/// Every operation the SDK knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ChannelStatus,
    SendNotification,
    GetUserActivities,
    SendCustomActivity,
    GetState,
    SetState,
    GetLeaderboard,
    GetUserLeaderboardPosition,
    GetUserScores,
    SetUserScore,
    CreateUnverifiedChannel,
    VerifyUnverifiedChannel,
    ChannelHeartbeat,
    TriggerRulesEngine,
    CreateMessageChannel,
    GetMessageChannels,
    GetChannelMessages,
    SendChannelMessage,
    EditChannelMessage,
    UnsendChannelMessage,
}

impl Operation {
    /// All operations, in catalog order.
    pub const ALL: [Operation; 20] = [
        Self::ChannelStatus,
        Self::SendNotification,
        Self::GetUserActivities,
        Self::SendCustomActivity,
        Self::GetState,
        Self::SetState,
        Self::GetLeaderboard,
        Self::GetUserLeaderboardPosition,
        Self::GetUserScores,
        Self::SetUserScore,
        Self::CreateUnverifiedChannel,
        Self::VerifyUnverifiedChannel,
        Self::ChannelHeartbeat,
        Self::TriggerRulesEngine,
        Self::CreateMessageChannel,
        Self::GetMessageChannels,
        Self::GetChannelMessages,
        Self::SendChannelMessage,
        Self::EditChannelMessage,
        Self::UnsendChannelMessage,
    ];

    /// Looks up the routing for this operation.
    pub const fn spec(self) -> OperationSpec {
        match self {
            Self::ChannelStatus => launcher("channelStatus", true),
            Self::SendNotification => launcher("sendNotification", true),
            Self::GetUserActivities => OperationSpec {
                method: HttpMethod::Get,
                path: ACTIVITIES_PATH,
                discriminator: "",
                requires_auth: false,
            },
            Self::SendCustomActivity => launcher("sendCustomActivity", true),
            Self::GetState => launcher("getState", true),
            Self::SetState => launcher("setState", true),
            Self::GetLeaderboard => OperationSpec {
                method: HttpMethod::Post,
                path: SCORES_PATH,
                discriminator: "getGameScoresLeaderboard",
                requires_auth: false,
            },
            Self::GetUserLeaderboardPosition => {
                launcher("getUsersPositionInGameScoreLeaderboard", false)
            }
            Self::GetUserScores => launcher("getUserScores", true),
            Self::SetUserScore => launcher("setUserScore", true),
            Self::CreateUnverifiedChannel => launcher("createUnverifiedChannel", false),
            Self::VerifyUnverifiedChannel => launcher("verifyUnverifiedChannel", false),
            Self::ChannelHeartbeat => launcher("channelHeartbeat", true),
            Self::TriggerRulesEngine => launcher("triggerRulesEngine", true),
            Self::CreateMessageChannel => launcher("createMessageChannel", true),
            Self::GetMessageChannels => launcher("getMessageChannels", true),
            Self::GetChannelMessages => launcher("getChannelMessages", true),
            Self::SendChannelMessage => launcher("sendChannelMessage", true),
            Self::EditChannelMessage => launcher("editChannelMessage", true),
            Self::UnsendChannelMessage => launcher("unsendChannelMessage", true),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.spec();
        if spec.discriminator.is_empty() {
            write!(f, "{} {}", spec.method, spec.path)
        } else {
            write!(f, "{}", spec.discriminator)
        }
    }
}

const fn launcher(discriminator: &'static str, requires_auth: bool) -> OperationSpec {
    OperationSpec {
        method: HttpMethod::Post,
        path: LAUNCHER_PATH,
        discriminator,
        requires_auth,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_spec_post_operations_have_discriminators() {
        for op in Operation::ALL {
            let spec = op.spec();
            match spec.method {
                HttpMethod::Post => assert!(
                    !spec.discriminator.is_empty(),
                    "{op:?} is a POST without a discriminator"
                ),
                HttpMethod::Get => assert!(spec.discriminator.is_empty()),
            }
        }
    }

    #[test]
    fn test_spec_discriminators_are_unique() {
        let mut seen = HashSet::new();
        for op in Operation::ALL {
            let d = op.spec().discriminator;
            if !d.is_empty() {
                assert!(seen.insert(d), "duplicate discriminator {d}");
            }
        }
    }

    #[test]
    fn test_spec_leaderboard_uses_scores_path_without_auth() {
        let spec = Operation::GetLeaderboard.spec();
        assert_eq!(spec.path, SCORES_PATH);
        assert_eq!(spec.discriminator, "getGameScoresLeaderboard");
        assert!(!spec.requires_auth);
    }

    #[test]
    fn test_spec_activities_is_unauthenticated_get() {
        let spec = Operation::GetUserActivities.spec();
        assert_eq!(spec.method, HttpMethod::Get);
        assert_eq!(spec.path, ACTIVITIES_PATH);
        assert!(!spec.requires_auth);
    }

    #[test]
    fn test_spec_channel_verification_is_unauthenticated() {
        assert!(!Operation::CreateUnverifiedChannel.spec().requires_auth);
        assert!(!Operation::VerifyUnverifiedChannel.spec().requires_auth);
        assert!(!Operation::GetUserLeaderboardPosition.spec().requires_auth);
        assert!(Operation::ChannelHeartbeat.spec().requires_auth);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::ChannelHeartbeat.to_string(), "channelHeartbeat");
        assert_eq!(Operation::GetUserActivities.to_string(), "GET /activities");
    }
}
