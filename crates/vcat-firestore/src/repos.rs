//! Typed repository for catalog videos.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use vcat_models::{AssetRef, NewVideo, PageRequest, Video, VideoId};

use crate::client::FirestoreClient;
use crate::error::{FirestoreError, FirestoreResult};
use crate::types::{Direction, Document, StructuredQuery, ToFirestoreValue, Value};

/// Field the list query orders by.
const CREATED_AT: &str = "created_at";

/// Repository for video documents.
#[derive(Clone)]
pub struct VideoRepository {
    client: FirestoreClient,
    collection: String,
}

impl VideoRepository {
    /// Repository over the client's configured videos collection.
    pub fn new(client: FirestoreClient) -> Self {
        let collection = client.config().videos_collection.clone();
        Self { client, collection }
    }

    /// Repository over an explicit collection.
    pub fn with_collection(client: FirestoreClient, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Persist a new video under a freshly generated id.
    pub async fn create(&self, new: NewVideo) -> FirestoreResult<Video> {
        let id = VideoId::new();
        let now = Utc::now();
        let fields = new_video_to_fields(&new, now);

        self.client
            .create_document(&self.collection, id.as_str(), fields)
            .await?;
        info!(video_id = %id, "Created video record");

        Ok(Video::from_new(id, new, now))
    }

    /// Get a video by ID.
    pub async fn get(&self, video_id: &VideoId) -> FirestoreResult<Option<Video>> {
        let doc = self
            .client
            .get_document(&self.collection, video_id.as_str())
            .await?;

        match doc {
            Some(d) => Ok(Some(document_to_video(&d, video_id)?)),
            None => Ok(None),
        }
    }

    /// One page of videos, newest first.
    pub async fn list(&self, page: PageRequest) -> FirestoreResult<Vec<Video>> {
        let offset = u32::try_from(page.offset()).unwrap_or(u32::MAX);
        let query = StructuredQuery::collection(self.collection.clone())
            .order_by(CREATED_AT, Direction::Descending)
            .offset(offset)
            .limit(page.limit);

        let docs = self.client.run_query("", query).await?;
        debug!(count = docs.len(), page = page.page, limit = page.limit, "Listed videos");

        let mut videos = Vec::with_capacity(docs.len());
        for doc in &docs {
            let Some(id) = doc.id() else {
                warn!("Skipping query result without a document name");
                continue;
            };
            videos.push(document_to_video(doc, &VideoId::from_string(id))?);
        }

        Ok(videos)
    }
}

// ============================================================================
// Conversion Helpers
// ============================================================================

fn new_video_to_fields(video: &NewVideo, now: DateTime<Utc>) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("title".to_string(), video.title.to_firestore_value());
    fields.insert("description".to_string(), video.description.to_firestore_value());
    if let Some(asset) = &video.asset {
        fields.insert("asset_id".to_string(), asset.id.to_firestore_value());
    }
    if let Some(duration) = video.duration {
        fields.insert("duration".to_string(), duration.to_firestore_value());
    }
    fields.insert(CREATED_AT.to_string(), now.to_firestore_value());
    fields.insert("updated_at".to_string(), now.to_firestore_value());
    fields
}

fn document_to_video(doc: &Document, video_id: &VideoId) -> FirestoreResult<Video> {
    if doc.fields.is_none() {
        return Err(FirestoreError::InvalidResponse(format!(
            "Video {} has no fields",
            video_id
        )));
    }

    let created_at: DateTime<Utc> = doc.get(CREATED_AT).ok_or_else(|| {
        FirestoreError::InvalidResponse(format!("Video {} has no created_at", video_id))
    })?;

    Ok(Video {
        id: video_id.clone(),
        title: doc.get("title").unwrap_or_default(),
        description: doc.get("description").unwrap_or_default(),
        asset: doc
            .get::<String>("asset_id")
            .filter(|s| !s.is_empty())
            .map(AssetRef::new),
        duration: doc.get("duration"),
        poster: None,
        thumbnail: None,
        sources: Vec::new(),
        created_at,
        updated_at: doc.get("updated_at").unwrap_or(created_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_without_asset() {
        let now = Utc::now();
        let fields = new_video_to_fields(&NewVideo::new("A", "B"), now);

        assert_eq!(fields.get("title"), Some(&Value::StringValue("A".into())));
        assert_eq!(fields.get("description"), Some(&Value::StringValue("B".into())));
        assert!(!fields.contains_key("asset_id"));
        assert!(!fields.contains_key("duration"));
        assert!(fields.contains_key("created_at"));
        assert!(fields.contains_key("updated_at"));
    }

    #[test]
    fn test_fields_with_asset() {
        let new = NewVideo::new("A", "B").with_asset(AssetRef::new("asset-1"));
        let fields = new_video_to_fields(&new, Utc::now());
        assert_eq!(fields.get("asset_id"), Some(&Value::StringValue("asset-1".into())));
    }

    #[test]
    fn test_document_round_trips_to_video() {
        let now = Utc::now();
        let new = NewVideo::new("Title", "Desc").with_asset(AssetRef::new("a1"));
        let doc = Document::new(new_video_to_fields(&new, now));
        let id = VideoId::new();

        let video = document_to_video(&doc, &id).unwrap();
        assert_eq!(video.id, id);
        assert_eq!(video.title, "Title");
        assert_eq!(video.description, "Desc");
        assert_eq!(video.asset, Some(AssetRef::new("a1")));
        assert_eq!(video.created_at.timestamp(), now.timestamp());
        assert!(video.poster.is_none());
        assert!(video.sources.is_empty());
    }

    #[test]
    fn test_document_without_fields_is_invalid() {
        let doc = Document {
            name: None,
            fields: None,
            create_time: None,
            update_time: None,
        };
        let err = document_to_video(&doc, &VideoId::new()).unwrap_err();
        assert!(matches!(err, FirestoreError::InvalidResponse(_)));
    }

    #[test]
    fn test_document_field_fallbacks() {
        let now = Utc::now();
        let mut fields = new_video_to_fields(&NewVideo::new("A", "B"), now);
        fields.remove("updated_at");
        fields.insert("asset_id".to_string(), Value::StringValue(String::new()));

        let video = document_to_video(&Document::new(fields.clone()), &VideoId::new()).unwrap();
        assert_eq!(video.updated_at, video.created_at);
        assert!(video.asset.is_none());

        fields.remove(CREATED_AT);
        let err = document_to_video(&Document::new(fields), &VideoId::new()).unwrap_err();
        assert!(matches!(err, FirestoreError::InvalidResponse(_)));
    }
}
