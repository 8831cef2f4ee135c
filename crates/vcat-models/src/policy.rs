//! Playback policy.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access policy attached to a provider playback id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPolicy {
    /// Anyone holding the URL can stream.
    Public,
    /// Every URL must carry a signed token.
    Signed,
}

impl PlaybackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackPolicy::Public => "public",
            PlaybackPolicy::Signed => "signed",
        }
    }
}

impl fmt::Display for PlaybackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a policy string is not exactly `public` or `signed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown playback policy: {0:?}")]
pub struct PolicyParseError(pub String);

impl FromStr for PlaybackPolicy {
    type Err = PolicyParseError;

    /// Matching is exact; `"Public"` or `" public"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(PlaybackPolicy::Public),
            "signed" => Ok(PlaybackPolicy::Signed),
            other => Err(PolicyParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_policies() {
        assert_eq!("public".parse::<PlaybackPolicy>(), Ok(PlaybackPolicy::Public));
        assert_eq!("signed".parse::<PlaybackPolicy>(), Ok(PlaybackPolicy::Signed));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("Public".parse::<PlaybackPolicy>().is_err());
        assert!("".parse::<PlaybackPolicy>().is_err());
        assert!("private".parse::<PlaybackPolicy>().is_err());
        assert!(" signed".parse::<PlaybackPolicy>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&PlaybackPolicy::Signed).unwrap();
        assert_eq!(json, "\"signed\"");
    }
}
