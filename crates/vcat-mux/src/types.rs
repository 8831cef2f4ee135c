//! Mux Video REST API types.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vcat_models::{Asset, PlaybackId, PlaybackPolicy};

/// Body of `POST /video/v1/assets`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssetRequest {
    pub input: Vec<InputSettings>,
    pub playback_policy: Vec<PlaybackPolicy>,
    /// Test assets are watermarked and deleted after 24 hours.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub test: bool,
}

impl CreateAssetRequest {
    /// Single input under a single policy.
    pub fn new(source_url: impl Into<String>, policy: PlaybackPolicy, test: bool) -> Self {
        Self {
            input: vec![InputSettings {
                url: source_url.into(),
            }],
            playback_policy: vec![policy],
            test,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputSettings {
    pub url: String,
}

/// Envelope for single-asset responses.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetResponse {
    pub data: AssetData,
}

/// Asset as returned by the Mux API.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetData {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub max_stored_resolution: Option<String>,
    #[serde(default)]
    pub max_stored_frame_rate: Option<f64>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub passthrough: Option<String>,
    #[serde(default)]
    pub playback_ids: Vec<PlaybackIdData>,
}

/// Playback id as returned by the Mux API. The policy is kept raw since Mux
/// knows policies (e.g. `drm`) the catalog does not serve.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackIdData {
    pub id: String,
    pub policy: String,
}

impl PlaybackIdData {
    /// `None` for policies the catalog does not serve.
    pub fn to_playback_id(&self) -> Option<PlaybackId> {
        self.policy
            .parse::<PlaybackPolicy>()
            .ok()
            .map(|policy| PlaybackId { id: self.id.clone(), policy })
    }
}

impl AssetData {
    /// Convert into the catalog asset, without playback URLs.
    pub fn into_asset(self) -> Asset {
        let asset_id = self.id;
        let playback_ids = self
            .playback_ids
            .into_iter()
            .filter_map(|p| {
                let playback = p.to_playback_id();
                if playback.is_none() {
                    debug!(asset_id = %asset_id, policy = %p.policy, "Skipping unsupported playback policy");
                }
                playback
            })
            .collect();

        Asset {
            id: asset_id,
            created_at: self.created_at,
            status: self.status,
            duration: self.duration,
            max_stored_resolution: self.max_stored_resolution,
            max_stored_frame_rate: self.max_stored_frame_rate,
            aspect_ratio: self.aspect_ratio,
            passthrough: self.passthrough,
            playback_ids,
            poster: None,
            thumbnail: None,
            sources: Vec::new(),
        }
    }
}
