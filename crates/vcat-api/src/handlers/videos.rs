//! Video catalog handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use vcat_models::{PageRequest, Video, VideoSubmission};

use crate::error::{ApiError, ApiResult};
use crate::response::JsonBody;
use crate::state::AppState;

/// Raw list parameters. Kept as strings so bad values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListVideosQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `POST /videos`
pub async fn create_video(
    State(state): State<AppState>,
    payload: Result<Json<VideoSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, JsonBody<Video>)> {
    let Json(submission) = payload.map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        _ => ApiError::bad_request(e.body_text()),
    })?;

    let video = state.ingestion.create(submission).await?;
    Ok((StatusCode::CREATED, JsonBody(video)))
}

/// `GET /videos/:video_id`
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<JsonBody<Video>> {
    let video = state.delivery.get_by_id(&video_id).await?;
    Ok(JsonBody(video))
}

/// `GET /videos?page=&limit=`
pub async fn list_videos(
    State(state): State<AppState>,
    query: Result<Query<ListVideosQuery>, QueryRejection>,
) -> ApiResult<JsonBody<Vec<Video>>> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    let videos = state.delivery.list(page).await?;
    Ok(JsonBody(videos))
}
