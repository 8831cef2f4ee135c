//! Video catalog models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::asset::{Asset, AssetRef, Source};

/// Length of a hyphenated UUID.
const VIDEO_ID_LEN: usize = 36;

/// Unique identifier for a catalog video.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Generate a new random video ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the id is a 36-character hyphenated UUID.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == VIDEO_ID_LEN && Uuid::parse_str(&self.0).is_ok()
    }
}

impl Default for VideoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Client submission for a new catalog entry.
///
/// Missing `title`/`description` deserialize to empty strings so they fail
/// validation instead of decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, JsonSchema)]
pub struct VideoSubmission {
    #[serde(default)]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    /// Media to ingest. Never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Raw policy string, checked only when `source_url` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

impl VideoSubmission {
    /// Source URL if present and non-empty.
    pub fn source(&self) -> Option<&str> {
        self.source_url.as_deref().filter(|s| !s.is_empty())
    }
}

/// Record handed to the video store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub asset: Option<AssetRef>,
    pub duration: Option<f64>,
}

impl NewVideo {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            asset: None,
            duration: None,
        }
    }

    pub fn with_asset(mut self, asset: AssetRef) -> Self {
        self.asset = Some(asset);
        self
    }
}

/// Persisted catalog video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<AssetRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Build a freshly created record from a store-assigned id.
    pub fn from_new(id: VideoId, new: NewVideo, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            asset: new.asset,
            duration: new.duration,
            poster: None,
            thumbnail: None,
            sources: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace playback fields with the asset's. Nothing is merged.
    pub fn apply_playback(&mut self, asset: Asset) {
        self.poster = asset.poster;
        self.thumbnail = asset.thumbnail;
        self.sources = asset.sources;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_video() -> Video {
        Video::from_new(
            VideoId::new(),
            NewVideo::new("A", "B"),
            Utc::now(),
        )
    }

    #[test]
    fn test_video_id_well_formed() {
        assert!(VideoId::new().is_well_formed());
        assert!(VideoId::from("6ba7b810-9dad-11d1-80b4-00c04fd430c8").is_well_formed());
    }

    #[test]
    fn test_video_id_malformed() {
        assert!(!VideoId::from("not-36-chars").is_well_formed());
        assert!(!VideoId::from("").is_well_formed());
        // simple form parses as a UUID but is not 36 chars
        assert!(!VideoId::from("6ba7b8109dad11d180b400c04fd430c8").is_well_formed());
        // right length, not a UUID
        assert!(!VideoId::from("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz").is_well_formed());
    }

    #[test]
    fn test_submission_validation() {
        let ok = VideoSubmission {
            title: "A".into(),
            description: "B".into(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let no_title = VideoSubmission {
            description: "B".into(),
            ..Default::default()
        };
        assert!(no_title.validate().is_err());

        let no_description = VideoSubmission {
            title: "A".into(),
            ..Default::default()
        };
        assert!(no_description.validate().is_err());
    }

    #[test]
    fn test_submission_missing_fields_decode_as_empty() {
        let sub: VideoSubmission = serde_json::from_str(r#"{"title":"A"}"#).unwrap();
        assert_eq!(sub.description, "");
        assert!(sub.validate().is_err());
    }

    #[test]
    fn test_submission_source_ignores_empty() {
        let sub = VideoSubmission {
            source_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(sub.source(), None);
    }

    #[test]
    fn test_video_without_asset_omits_playback_keys() {
        let json = serde_json::to_value(sample_video()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("poster"));
        assert!(!obj.contains_key("thumbnail"));
        assert!(!obj.contains_key("sources"));
        assert!(!obj.contains_key("asset"));
    }

    #[test]
    fn test_apply_playback_overwrites() {
        let mut video = sample_video();
        video.poster = Some("old-poster".into());
        video.sources = vec![Source::hls("old"), Source::hls("older")];

        let asset = Asset {
            id: "asset".into(),
            poster: Some("new-poster".into()),
            thumbnail: Some("new-thumb".into()),
            sources: vec![Source::hls("new")],
            ..Default::default()
        };
        video.apply_playback(asset);

        assert_eq!(video.poster.as_deref(), Some("new-poster"));
        assert_eq!(video.thumbnail.as_deref(), Some("new-thumb"));
        assert_eq!(video.sources, vec![Source::hls("new")]);
    }
}
