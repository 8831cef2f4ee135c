//! Asset gateway over the Mux API.
//!
//! Creates assets from source URLs and turns asset metadata into browsable
//! playback URLs. Public playback ids get plain URLs; signed ones get a
//! token per URL purpose.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use vcat_models::{Asset, AssetRef, PlaybackId, PlaybackPolicy, Source};

use crate::client::{MuxClient, MuxConfig};
use crate::error::MuxResult;
use crate::signing::{Audience, RsaUrlSigner, UrlSigner};
use crate::types::CreateAssetRequest;

/// HLS delivery host.
pub const STREAM_BASE_URL: &str = "https://stream.mux.com";

/// Image delivery host.
pub const IMAGE_BASE_URL: &str = "https://image.mux.com";

/// Poster dimensions.
pub const POSTER_SIZE: (u32, u32) = (1920, 1080);

/// Thumbnail dimensions.
pub const THUMBNAIL_SIZE: (u32, u32) = (640, 360);

/// Playback URLs derived from one playback id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackUrls {
    pub manifest: String,
    pub poster: String,
    pub thumbnail: String,
}

/// Manifest URL for a public playback id.
pub fn public_manifest_url(playback_id: &str) -> String {
    format!("{}/{}.m3u8", STREAM_BASE_URL, playback_id)
}

/// Image URL for a public playback id.
pub fn public_image_url(playback_id: &str, (width, height): (u32, u32)) -> String {
    format!(
        "{}/{}/thumbnail.png?width={}&height={}&smart_crop=true&time={}",
        IMAGE_BASE_URL,
        playback_id,
        width,
        height,
        crate::signing::THUMBNAIL_TIME_SECS
    )
}

/// Manifest URL for a signed playback id.
pub fn signed_manifest_url(playback_id: &str, token: &str) -> String {
    format!("{}/{}.m3u8?token={}", STREAM_BASE_URL, playback_id, token)
}

/// Image URL for a signed playback id. Size and crop live in the token.
pub fn signed_image_url(playback_id: &str, token: &str) -> String {
    format!("{}/{}/thumbnail.png?token={}", IMAGE_BASE_URL, playback_id, token)
}

/// Mux-backed asset gateway.
#[derive(Clone)]
pub struct MuxAssets {
    client: MuxClient,
    signer: Arc<dyn UrlSigner>,
    test_assets: bool,
}

impl MuxAssets {
    pub fn new(client: MuxClient, signer: Arc<dyn UrlSigner>, test_assets: bool) -> Self {
        Self {
            client,
            signer,
            test_assets,
        }
    }

    /// Build the client and RS256 signer from one config.
    pub fn from_config(config: &MuxConfig) -> MuxResult<Self> {
        let client = MuxClient::new(config)?;
        let signer = RsaUrlSigner::new(&config.signing_key_id, &config.signing_key_secret);
        Ok(Self::new(client, Arc::new(signer), config.test_assets))
    }

    /// Create from environment variables.
    pub fn from_env() -> MuxResult<Self> {
        Self::from_config(&MuxConfig::from_env()?)
    }

    /// Submit `source_url` for ingestion under exactly one policy.
    pub async fn create_asset(&self, source_url: &str, policy: PlaybackPolicy) -> MuxResult<AssetRef> {
        let request = CreateAssetRequest::new(source_url, policy, self.test_assets);

        match self.client.create_asset(&request).await {
            Ok(data) => {
                info!(asset_id = %data.id, policy = %policy, "Created asset");
                Ok(AssetRef::new(data.id))
            }
            Err(e) => {
                error!(source_url = %source_url, policy = %policy, error = %e, "Asset creation failed");
                Err(e)
            }
        }
    }

    /// Fetch asset metadata and derive playback URLs from its first playback id.
    ///
    /// Any signing failure fails the whole call; partial URL sets are never
    /// returned.
    pub async fn get_asset(&self, asset_id: &str) -> MuxResult<Asset> {
        let data = self.client.get_asset(asset_id).await?;
        let primary = data
            .playback_ids
            .first()
            .map(|p| (p.to_playback_id(), p.policy.clone()));
        let mut asset = data.into_asset();

        let playback = match primary {
            None => {
                debug!(asset_id = %asset_id, "Asset has no playback ids");
                return Ok(asset);
            }
            Some((None, policy)) => {
                warn!(asset_id = %asset_id, policy = %policy, "First playback id has an unsupported policy");
                return Ok(asset);
            }
            Some((Some(playback), _)) => playback,
        };

        let urls = self.playback_urls(&playback, asset.duration_or_zero())?;

        asset.poster = Some(urls.poster);
        asset.thumbnail = Some(urls.thumbnail);
        asset.sources = vec![Source::hls(urls.manifest)];
        Ok(asset)
    }

    /// URLs for one playback id. Signed ids cost three signatures.
    pub fn playback_urls(&self, playback: &PlaybackId, duration_secs: f64) -> MuxResult<PlaybackUrls> {
        let pid = playback.id.as_str();

        match playback.policy {
            PlaybackPolicy::Public => Ok(PlaybackUrls {
                manifest: public_manifest_url(pid),
                poster: public_image_url(pid, POSTER_SIZE),
                thumbnail: public_image_url(pid, THUMBNAIL_SIZE),
            }),
            PlaybackPolicy::Signed => {
                let video_token = self.signer.sign(pid, Audience::Video, duration_secs, 0, 0)?;
                let (w, h) = POSTER_SIZE;
                let poster_token = self.signer.sign(pid, Audience::Thumbnail, duration_secs, w, h)?;
                let (w, h) = THUMBNAIL_SIZE;
                let thumbnail_token = self.signer.sign(pid, Audience::Thumbnail, duration_secs, w, h)?;

                Ok(PlaybackUrls {
                    manifest: signed_manifest_url(pid, &video_token),
                    poster: signed_image_url(pid, &poster_token),
                    thumbnail: signed_image_url(pid, &thumbnail_token),
                })
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
