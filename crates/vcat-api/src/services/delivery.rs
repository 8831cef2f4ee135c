//! Video lookup and playback hydration.

use std::sync::Arc;

use tracing::{debug, warn};

use vcat_models::{PageRequest, Video, VideoId};

use crate::metrics::record_hydration_failure;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::{AssetGateway, VideoStore};

#[derive(Clone)]
pub struct DeliveryService {
    store: Arc<dyn VideoStore>,
    assets: Arc<dyn AssetGateway>,
}

impl DeliveryService {
    pub fn new(store: Arc<dyn VideoStore>, assets: Arc<dyn AssetGateway>) -> Self {
        Self { store, assets }
    }

    /// Fetch one video and fill in its playback URLs.
    ///
    /// A failed asset lookup is logged and the stored record is returned as-is.
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Video> {
        let id = VideoId::from_string(id);
        if !id.is_well_formed() {
            return Err(ServiceError::unprocessable(format!("malformed video id {:?}", id.as_str())));
        }

        let mut video = self
            .store
            .get_by_id(&id)
            .await?
            .ok_or_else(|| ServiceError::VideoNotFound(id.clone()))?;

        let Some(asset_id) = video.asset.as_ref().map(|a| a.id.clone()) else {
            return Ok(video);
        };

        match self.assets.get_asset(&asset_id).await {
            Ok(asset) => {
                debug!(video_id = %id, asset_id = %asset_id, "Hydrated playback URLs");
                video.apply_playback(asset);
            }
            Err(e) => {
                warn!(
                    video_id = %id,
                    asset_id = %asset_id,
                    error = %e,
                    "Asset lookup failed; serving stored video"
                );
                record_hydration_failure();
            }
        }

        Ok(video)
    }

    /// One page of videos, newest first. Playback URLs are not filled in.
    pub async fn list(&self, page: PageRequest) -> ServiceResult<Vec<Video>> {
        Ok(self.store.list(page).await?)
    }
}
