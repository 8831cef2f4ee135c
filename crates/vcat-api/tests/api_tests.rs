//! API integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use vcat_api::{create_router, ApiConfig, AppState, AssetGateway, VideoStore};
use vcat_firestore::{FirestoreError, FirestoreResult};
use vcat_models::{Asset, AssetRef, NewVideo, PageRequest, PlaybackPolicy, Video, VideoId};
use vcat_mux::{MuxError, MuxResult};

/// Backends that fail every call; health routes must not touch them.
struct Offline;

#[async_trait]
impl VideoStore for Offline {
    async fn create(&self, _video: NewVideo) -> FirestoreResult<Video> {
        Err(FirestoreError::ServerError(503, "offline".into()))
    }

    async fn get_by_id(&self, _id: &VideoId) -> FirestoreResult<Option<Video>> {
        Err(FirestoreError::ServerError(503, "offline".into()))
    }

    async fn list(&self, _page: PageRequest) -> FirestoreResult<Vec<Video>> {
        Err(FirestoreError::ServerError(503, "offline".into()))
    }
}

#[async_trait]
impl AssetGateway for Offline {
    async fn create_asset(&self, _source_url: &str, _policy: PlaybackPolicy) -> MuxResult<AssetRef> {
        Err(MuxError::ServerError(503, "offline".into()))
    }

    async fn get_asset(&self, _asset_id: &str) -> MuxResult<Asset> {
        Err(MuxError::ServerError(503, "offline".into()))
    }
}

fn create_test_router() -> Router {
    let config = ApiConfig {
        commit: "deadbeef".to_string(),
        version: "1.2.3".to_string(),
        ..ApiConfig::default()
    };
    let state = AppState::with_backends(config, Arc::new(Offline), Arc::new(Offline));
    create_router(state, None)
}

async fn get(uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = create_test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, content_type, body)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, _, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_app_healthz() {
    let (status, content_type, body) = get("/app/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json; charset=UTF-8"));
    assert_eq!(body, json!({ "message": "Hello World!", "status": 200 }));
}

#[tokio::test]
async fn test_app_statusz() {
    let (status, _, body) = get("/app/statusz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "commit": "deadbeef", "version": "1.2.3" }));
}

#[tokio::test]
async fn test_metrics_endpoint_absent_when_disabled() {
    let (status, _, body) = get("/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not found", "status": 404 }));
}

#[tokio::test]
async fn test_store_outage_surfaces_as_internal_error() {
    let (status, _, body) = get("/videos").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal server error", "status": 500 }));
}

#[tokio::test]
#[ignore = "requires Firestore and Mux credentials"]
async fn test_live_round_trip() {
    dotenvy::dotenv().ok();
    let _ = rustls::crypto::ring::default_provider().install_default();

    let state = AppState::new(ApiConfig::from_env()).await.unwrap();
    let app = create_router(state, None);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/videos")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"Live","description":"round trip"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    let id = created["id"].as_str().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/videos/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
