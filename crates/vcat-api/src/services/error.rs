//! Service error types.

use thiserror::Error;

use vcat_firestore::FirestoreError;
use vcat_models::VideoId;
use vcat_mux::MuxError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Failed validation or a malformed identifier. Nothing external was called.
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Invalid playback policy: {0:?}")]
    PolicyInvalid(String),

    #[error("Asset ingestion failed: {0}")]
    IngestionFailed(#[source] MuxError),

    #[error("Video not found: {0}")]
    VideoNotFound(VideoId),

    #[error("Store error: {0}")]
    Store(#[from] FirestoreError),
}

impl ServiceError {
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::Unprocessable(msg.into())
    }
}
