//! JSON response bodies.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Content type of every JSON body the API writes.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Serialized fallback used when a body fails to serialize.
const INTERNAL_ERROR_BODY: &str = r#"{"message":"Internal server error","status":500}"#;

/// `{"message", "status"}` envelope used for errors and health responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
    pub status: u16,
}

impl StatusMessage {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

/// JSON body with an explicit UTF-8 charset.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T: Serialize> IntoResponse for JsonBody<T> {
    fn into_response(self) -> Response {
        let content_type = [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        )];

        match serde_json::to_vec(&self.0) {
            Ok(bytes) => (content_type, bytes).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to serialize response body");
                (StatusCode::INTERNAL_SERVER_ERROR, content_type, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}
