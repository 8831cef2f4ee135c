//! Provider asset models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::policy::PlaybackPolicy;

/// MIME type of HLS manifests.
pub const HLS_MIME_TYPE: &str = "application/x-mpegURL";

/// Reference from a video record to a provider asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssetRef {
    pub id: String,
}

impl AssetRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A playable manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Source {
    pub src: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl Source {
    /// HLS manifest source.
    pub fn hls(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            mime_type: HLS_MIME_TYPE.to_string(),
        }
    }
}

/// Provider playback id with its policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlaybackId {
    pub id: String,
    pub policy: PlaybackPolicy,
}

/// Asset metadata as reported by the provider, plus derived playback URLs.
///
/// `poster`, `thumbnail` and `sources` are only filled when the asset has at
/// least one playback id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Asset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stored_resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stored_frame_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub playback_ids: Vec<PlaybackId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl Asset {
    /// Duration used for token lifetimes; unknown durations count as zero.
    pub fn duration_or_zero(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }
}
