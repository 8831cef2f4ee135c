//! Mux error types.

use thiserror::Error;

/// Result type for Mux operations.
pub type MuxResult<T> = Result<T, MuxError>;

/// Errors that can occur talking to Mux or signing playback URLs.
#[derive(Debug, Error)]
pub enum MuxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signing key is not valid base64: {0}")]
    KeyDecode(String),

    #[error("Signing key is not a valid RSA PEM: {0}")]
    KeyParse(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Server error ({0}): {1}")]
    ServerError(u16, String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MuxError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Map a non-success HTTP status from the Mux API.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::AssetNotFound(message),
            429 => Self::RateLimited,
            500..=599 => Self::ServerError(status, message),
            _ => Self::RequestFailed(message),
        }
    }

    /// HTTP status this error corresponds to, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::AssetNotFound(_) => Some(404),
            Self::RateLimited => Some(429),
            Self::ServerError(status, _) => Some(*status),
            Self::RequestFailed(_) => Some(400),
            _ => None,
        }
    }

    /// True for failures of the local signing step.
    pub fn is_signing_error(&self) -> bool {
        matches!(self, Self::KeyDecode(_) | Self::KeyParse(_) | Self::Signing(_))
    }
}
