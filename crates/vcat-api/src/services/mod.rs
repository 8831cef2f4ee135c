//! Catalog services and the backends they depend on.
//!
//! The store and the asset gateway are traits so the services can be driven
//! by mocks in tests; production wires in Firestore and Mux.

pub mod delivery;
pub mod error;
pub mod ingestion;

use async_trait::async_trait;

use vcat_firestore::{FirestoreResult, VideoRepository};
use vcat_models::{Asset, AssetRef, NewVideo, PageRequest, PlaybackPolicy, Video, VideoId};
use vcat_mux::{MuxAssets, MuxResult};

pub use delivery::DeliveryService;
pub use error::{ServiceError, ServiceResult};
pub use ingestion::IngestionService;

/// Persistence for catalog videos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Persist a new video; the store assigns the id and timestamps.
    async fn create(&self, video: NewVideo) -> FirestoreResult<Video>;

    async fn get_by_id(&self, id: &VideoId) -> FirestoreResult<Option<Video>>;

    /// One page, newest first.
    async fn list(&self, page: PageRequest) -> FirestoreResult<Vec<Video>>;
}

/// Remote asset processing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetGateway: Send + Sync {
    async fn create_asset(&self, source_url: &str, policy: PlaybackPolicy) -> MuxResult<AssetRef>;

    /// Asset metadata with playback URLs derived from its first playback id.
    async fn get_asset(&self, asset_id: &str) -> MuxResult<Asset>;
}

#[async_trait]
impl VideoStore for VideoRepository {
    async fn create(&self, video: NewVideo) -> FirestoreResult<Video> {
        VideoRepository::create(self, video).await
    }

    async fn get_by_id(&self, id: &VideoId) -> FirestoreResult<Option<Video>> {
        VideoRepository::get(self, id).await
    }

    async fn list(&self, page: PageRequest) -> FirestoreResult<Vec<Video>> {
        VideoRepository::list(self, page).await
    }
}

#[async_trait]
impl AssetGateway for MuxAssets {
    async fn create_asset(&self, source_url: &str, policy: PlaybackPolicy) -> MuxResult<AssetRef> {
        MuxAssets::create_asset(self, source_url, policy).await
    }

    async fn get_asset(&self, asset_id: &str) -> MuxResult<Asset> {
        MuxAssets::get_asset(self, asset_id).await
    }
}
