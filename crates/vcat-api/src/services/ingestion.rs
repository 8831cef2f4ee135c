//! Video ingestion.

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use vcat_models::{NewVideo, PlaybackPolicy, Video, VideoSubmission};

use crate::metrics::record_ingestion;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::{AssetGateway, VideoStore};

/// Validates submissions, creates remote assets and persists the record.
#[derive(Clone)]
pub struct IngestionService {
    store: Arc<dyn VideoStore>,
    assets: Arc<dyn AssetGateway>,
}

impl IngestionService {
    pub fn new(store: Arc<dyn VideoStore>, assets: Arc<dyn AssetGateway>) -> Self {
        Self { store, assets }
    }

    /// Ingest one submission.
    ///
    /// Validation and policy errors are raised before any external call. A
    /// submission without a source URL never reaches the gateway, whatever
    /// its policy. If the store write fails after an asset was created, the
    /// asset is left in place and its id is logged.
    pub async fn create(&self, submission: VideoSubmission) -> ServiceResult<Video> {
        if let Err(e) = submission.validate() {
            record_ingestion("invalid");
            return Err(ServiceError::unprocessable(e.to_string()));
        }

        let mut new = NewVideo::new(submission.title.clone(), submission.description.clone());

        if let Some(source_url) = submission.source() {
            let raw_policy = submission.policy.as_deref().unwrap_or_default();
            let policy: PlaybackPolicy = raw_policy.parse().map_err(|_| {
                record_ingestion("invalid_policy");
                ServiceError::PolicyInvalid(raw_policy.to_string())
            })?;

            let asset = self
                .assets
                .create_asset(source_url, policy)
                .await
                .map_err(|e| {
                    error!(policy = %policy, error = %e, "Asset creation failed during ingestion");
                    record_ingestion("ingestion_failed");
                    ServiceError::IngestionFailed(e)
                })?;

            new = new.with_asset(asset);
        }

        let asset_id = new.asset.as_ref().map(|a| a.id.clone());

        match self.store.create(new).await {
            Ok(video) => {
                info!(video_id = %video.id, asset_id = ?asset_id, "Ingested video");
                record_ingestion("created");
                Ok(video)
            }
            Err(e) => {
                if let Some(asset_id) = &asset_id {
                    warn!(asset_id = %asset_id, error = %e, "Store write failed; asset left orphaned");
                }
                record_ingestion("store_failed");
                Err(ServiceError::Store(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;
    use vcat_firestore::FirestoreError;
    use vcat_models::{AssetRef, VideoId};
    use vcat_mux::MuxError;

    use crate::services::{MockAssetGateway, MockVideoStore};

    fn submission(source_url: Option<&str>, policy: Option<&str>) -> VideoSubmission {
        VideoSubmission {
            title: "A".into(),
            description: "B".into(),
            source_url: source_url.map(String::from),
            policy: policy.map(String::from),
        }
    }

    fn service(store: MockVideoStore, assets: MockAssetGateway) -> IngestionService {
        IngestionService::new(Arc::new(store), Arc::new(assets))
    }

    fn echo_store() -> MockVideoStore {
        let mut store = MockVideoStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|new| Ok(Video::from_new(VideoId::new(), new, Utc::now())));
        store
    }

    #[tokio::test]
    async fn test_empty_title_touches_nothing() {
        let mut store = MockVideoStore::new();
        store.expect_create().never();
        let mut assets = MockAssetGateway::new();
        assets.expect_create_asset().never();

        let mut sub = submission(Some("https://x/y.mp4"), Some("public"));
        sub.title.clear();

        let err = service(store, assets).create(sub).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unprocessable(_)));
    }

    #[tokio::test]
    async fn test_empty_description_touches_nothing() {
        let mut store = MockVideoStore::new();
        store.expect_create().never();
        let mut assets = MockAssetGateway::new();
        assets.expect_create_asset().never();

        let mut sub = submission(None, None);
        sub.description.clear();

        let err = service(store, assets).create(sub).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unprocessable(_)));
    }

    #[tokio::test]
    async fn test_invalid_policy_never_calls_gateway() {
        for policy in [Some("drm"), Some("Public"), Some(""), None] {
            let mut store = MockVideoStore::new();
            store.expect_create().never();
            let mut assets = MockAssetGateway::new();
            assets.expect_create_asset().never();

            let err = service(store, assets)
                .create(submission(Some("https://x/y.mp4"), policy))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::PolicyInvalid(_)), "policy {:?}", policy);
        }
    }

    #[tokio::test]
    async fn test_no_source_skips_gateway_regardless_of_policy() {
        for source in [None, Some("")] {
            let mut assets = MockAssetGateway::new();
            assets.expect_create_asset().never();

            let video = service(echo_store(), assets)
                .create(submission(source, Some("garbage")))
                .await
                .unwrap();
            assert!(video.asset.is_none());
        }
    }

    #[tokio::test]
    async fn test_public_source_creates_asset_and_persists_reference() {
        let mut assets = MockAssetGateway::new();
        assets
            .expect_create_asset()
            .with(eq("https://x/y.mp4"), eq(PlaybackPolicy::Public))
            .times(1)
            .returning(|_, _| Ok(AssetRef::new("asset-1")));

        let mut store = MockVideoStore::new();
        store
            .expect_create()
            .withf(|new| new.asset == Some(AssetRef::new("asset-1")) && new.title == "A")
            .times(1)
            .returning(|new| Ok(Video::from_new(VideoId::new(), new, Utc::now())));

        let video = service(store, assets)
            .create(submission(Some("https://x/y.mp4"), Some("public")))
            .await
            .unwrap();

        assert_eq!(video.asset, Some(AssetRef::new("asset-1")));
        assert!(video.id.is_well_formed());
    }

    #[tokio::test]
    async fn test_signed_policy_is_forwarded() {
        let mut assets = MockAssetGateway::new();
        assets
            .expect_create_asset()
            .with(eq("https://x/y.mp4"), eq(PlaybackPolicy::Signed))
            .times(1)
            .returning(|_, _| Ok(AssetRef::new("asset-2")));

        let video = service(echo_store(), assets)
            .create(submission(Some("https://x/y.mp4"), Some("signed")))
            .await
            .unwrap();
        assert_eq!(video.asset, Some(AssetRef::new("asset-2")));
    }

    #[tokio::test]
    async fn test_gateway_failure_is_ingestion_failed() {
        let mut assets = MockAssetGateway::new();
        assets
            .expect_create_asset()
            .returning(|_, _| Err(MuxError::ServerError(502, "bad gateway".into())));
        let mut store = MockVideoStore::new();
        store.expect_create().never();

        let err = service(store, assets)
            .create(submission(Some("https://x/y.mp4"), Some("public")))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::IngestionFailed(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates_after_asset_creation() {
        let mut assets = MockAssetGateway::new();
        assets
            .expect_create_asset()
            .times(1)
            .returning(|_, _| Ok(AssetRef::new("orphan")));
        let mut store = MockVideoStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|_| Err(FirestoreError::ServerError(503, "unavailable".into())));

        let err = service(store, assets)
            .create(submission(Some("https://x/y.mp4"), Some("public")))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Store(FirestoreError::ServerError(503, _))));
    }
}
