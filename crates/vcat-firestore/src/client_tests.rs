//! Tests for the Firestore client and video repository against a mock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vcat_models::{AssetRef, NewVideo, PageRequest, VideoId};

use crate::client::{FirestoreClient, FirestoreConfig};
use crate::error::FirestoreError;
use crate::repos::VideoRepository;
use crate::retry::RetryConfig;

// =============================================================================
// Test Helpers
// =============================================================================

const DOCS: &str = "/v1/projects/demo/databases/(default)/documents";

fn test_config(server: &MockServer) -> FirestoreConfig {
    FirestoreConfig {
        project_id: "demo".to_string(),
        database_id: "(default)".to_string(),
        emulator_host: Some(server.address().to_string()),
        videos_collection: "videos".to_string(),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        retry: RetryConfig {
            max_retries: 2,
            base_delay_ms: 1,
            max_delay_ms: 5,
        },
    }
}

async fn repo(server: &MockServer) -> VideoRepository {
    let client = FirestoreClient::new(test_config(server)).await.unwrap();
    VideoRepository::new(client)
}

fn video_doc(id: &str, title: &str, created_at: &str) -> serde_json::Value {
    json!({
        "name": format!("projects/demo/databases/(default)/documents/videos/{}", id),
        "fields": {
            "title": { "stringValue": title },
            "description": { "stringValue": "desc" },
            "asset_id": { "stringValue": "asset-1" },
            "created_at": { "timestampValue": created_at },
            "updated_at": { "timestampValue": created_at }
        }
    })
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[test]
fn test_error_from_http_status_429() {
    let err = FirestoreError::from_http_status(429, "rate limited");
    assert!(matches!(err, FirestoreError::RateLimited(_)));
    assert!(err.is_retryable());
}

#[test]
fn test_error_from_http_status_503() {
    let err = FirestoreError::from_http_status(503, "service unavailable");
    assert!(matches!(err, FirestoreError::ServerError(503, _)));
    assert!(err.is_retryable());
}

#[test]
fn test_error_from_http_status_400() {
    let err = FirestoreError::from_http_status(400, "bad request");
    assert!(matches!(err, FirestoreError::RequestFailed(_)));
    assert!(!err.is_retryable());
}

#[test]
fn test_error_from_http_status_409() {
    let err = FirestoreError::from_http_status(409, "conflict");
    assert!(matches!(err, FirestoreError::AlreadyExists(_)));
    assert!(!err.is_retryable());
}

// =============================================================================
// Repository Tests
// =============================================================================

#[tokio::test]
async fn test_create_posts_document_with_generated_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/videos", DOCS)))
        .and(header("authorization", "Bearer owner"))
        .and(body_partial_json(json!({
            "fields": {
                "title": { "stringValue": "A" },
                "description": { "stringValue": "B" },
                "asset_id": { "stringValue": "asset-9" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/demo/databases/(default)/documents/videos/x",
            "fields": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = repo(&server).await;
    let video = repo
        .create(NewVideo::new("A", "B").with_asset(AssetRef::new("asset-9")))
        .await
        .unwrap();

    assert!(video.id.is_well_formed());
    assert_eq!(video.title, "A");
    assert_eq!(video.asset, Some(AssetRef::new("asset-9")));
    assert_eq!(video.created_at, video.updated_at);

    let requests = server.received_requests().await.unwrap();
    let document_id = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "documentId")
        .map(|(_, v)| v.into_owned());
    assert_eq!(document_id.as_deref(), Some(video.id.as_str()));
}

#[tokio::test]
async fn test_create_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/videos", DOCS)))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = repo(&server)
        .await
        .create(NewVideo::new("A", "B"))
        .await
        .unwrap_err();
    assert!(matches!(err, FirestoreError::ServerError(503, _)));
}

#[tokio::test]
async fn test_get_returns_video() {
    let server = MockServer::start().await;
    let id = VideoId::new();

    Mock::given(method("GET"))
        .and(path(format!("{}/videos/{}", DOCS, id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_doc(id.as_str(), "Hello", "2024-05-01T12:00:00Z")),
        )
        .mount(&server)
        .await;

    let video = repo(&server).await.get(&id).await.unwrap().unwrap();
    assert_eq!(video.id, id);
    assert_eq!(video.title, "Hello");
    assert_eq!(video.asset, Some(AssetRef::new("asset-1")));
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let server = MockServer::start().await;
    let id = VideoId::new();

    Mock::given(method("GET"))
        .and(path(format!("{}/videos/{}", DOCS, id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(repo(&server).await.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_retries_server_errors() {
    let server = MockServer::start().await;
    let id = VideoId::new();

    Mock::given(method("GET"))
        .and(path(format!("{}/videos/{}", DOCS, id)))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/videos/{}", DOCS, id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_doc(id.as_str(), "Later", "2024-05-01T12:00:00Z")),
        )
        .mount(&server)
        .await;

    let video = repo(&server).await.get(&id).await.unwrap().unwrap();
    assert_eq!(video.title, "Later");
}

#[tokio::test]
async fn test_list_sends_ordered_paged_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}:runQuery", DOCS)))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{ "collectionId": "videos" }],
                "orderBy": [{
                    "field": { "fieldPath": "created_at" },
                    "direction": "DESCENDING"
                }],
                "offset": 10,
                "limit": 5
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "document": video_doc("11111111-1111-4111-8111-111111111111", "newer", "2024-05-02T00:00:00Z"), "readTime": "2024-05-03T00:00:00Z" },
            { "document": video_doc("22222222-2222-4222-8222-222222222222", "older", "2024-05-01T00:00:00Z"), "readTime": "2024-05-03T00:00:00Z" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let videos = repo(&server).await.list(PageRequest::new(3, 5)).await.unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].title, "newer");
    assert_eq!(videos[0].id.as_str(), "11111111-1111-4111-8111-111111111111");
    assert_eq!(videos[1].title, "older");
}

#[tokio::test]
async fn test_list_empty_result() {
    let server = MockServer::start().await;

    // An empty collection answers with a single readTime-only element.
    Mock::given(method("POST"))
        .and(path(format!("{}:runQuery", DOCS)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "readTime": "2024-05-03T00:00:00Z" }])),
        )
        .mount(&server)
        .await;

    let videos = repo(&server).await.list(PageRequest::default()).await.unwrap();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_list_permission_denied_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}:runQuery", DOCS)))
        .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
        .expect(1)
        .mount(&server)
        .await;

    let err = repo(&server)
        .await
        .list(PageRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FirestoreError::PermissionDenied(_)));
}

#[tokio::test]
async fn test_create_conflict_maps_to_already_exists() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/videos", DOCS)))
        .and(query_param("documentId", "fixed"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let client = FirestoreClient::new(test_config(&server)).await.unwrap();
    let err = client
        .create_document("videos", "fixed", Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, FirestoreError::AlreadyExists(_)));
}
