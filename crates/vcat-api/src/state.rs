//! Application state.

use std::sync::Arc;

use anyhow::Context;

use vcat_firestore::{FirestoreClient, VideoRepository};
use vcat_mux::MuxAssets;

use crate::config::ApiConfig;
use crate::services::{AssetGateway, DeliveryService, IngestionService, VideoStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub ingestion: IngestionService,
    pub delivery: DeliveryService,
}

impl AppState {
    /// Wire Firestore and Mux from the environment.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let firestore = FirestoreClient::from_env()
            .await
            .context("failed to create Firestore client")?;
        let assets = MuxAssets::from_env().context("failed to configure Mux")?;

        Ok(Self::with_backends(
            config,
            Arc::new(VideoRepository::new(firestore)),
            Arc::new(assets),
        ))
    }

    pub fn with_backends(
        config: ApiConfig,
        store: Arc<dyn VideoStore>,
        assets: Arc<dyn AssetGateway>,
    ) -> Self {
        Self {
            config,
            ingestion: IngestionService::new(Arc::clone(&store), Arc::clone(&assets)),
            delivery: DeliveryService::new(store, assets),
        }
    }
}
