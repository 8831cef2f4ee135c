//! Mux Video REST API client.
//!
//! Thin transport over `https://api.mux.com/video/v1` with:
//! - HTTP basic auth from an access token pair
//! - Status mapping into [`MuxError`]
//! - Observability (tracing spans, metrics)

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, info_span, Instrument};

use crate::error::{MuxError, MuxResult};
use crate::metrics::record_request;
use crate::types::{AssetData, AssetResponse, CreateAssetRequest};

/// Default Mux API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.mux.com";

// =============================================================================
// Configuration
// =============================================================================

/// Mux client configuration.
#[derive(Clone)]
pub struct MuxConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Access token id (basic auth user)
    pub token_id: String,
    /// Access token secret (basic auth password)
    pub token_secret: String,
    /// Signing key id, placed in the `kid` of playback tokens
    pub signing_key_id: String,
    /// Base64-encoded PEM RSA private key for playback tokens
    pub signing_key_secret: String,
    /// Create watermarked test assets
    pub test_assets: bool,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl fmt::Debug for MuxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MuxConfig")
            .field("base_url", &self.base_url)
            .field("token_id", &self.token_id)
            .field("token_secret", &"[redacted]")
            .field("signing_key_id", &self.signing_key_id)
            .field("signing_key_secret", &"[redacted]")
            .field("test_assets", &self.test_assets)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl MuxConfig {
    /// Create config from environment variables.
    pub fn from_env() -> MuxResult<Self> {
        let required = |name: &str| -> MuxResult<String> {
            match std::env::var(name) {
                Ok(v) if !v.is_empty() => Ok(v),
                _ => Err(MuxError::config(format!("{} must be set", name))),
            }
        };

        let base_url = std::env::var("MUX_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let test_assets = std::env::var("MUX_TEST_ASSETS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let timeout_secs: u64 = std::env::var("MUX_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(15);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_id: required("MUX_TOKEN_ID")?,
            token_secret: required("MUX_TOKEN_SECRET")?,
            signing_key_id: required("MUX_SIGNING_KEY_ID")?,
            signing_key_secret: required("MUX_SIGNING_KEY_SECRET")?,
            test_assets,
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// Mux Video REST API client.
#[derive(Clone)]
pub struct MuxClient {
    http: Client,
    base_url: String,
    token_id: String,
    token_secret: String,
}

impl MuxClient {
    /// Create a new Mux client.
    pub fn new(config: &MuxConfig) -> MuxResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("vcat-mux/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MuxError::Network)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token_id: config.token_id.clone(),
            token_secret: config.token_secret.clone(),
        })
    }

    fn assets_url(&self) -> String {
        format!("{}/video/v1/assets", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.token_id, Some(&self.token_secret))
    }

    /// Create an asset.
    pub async fn create_asset(&self, request: &CreateAssetRequest) -> MuxResult<AssetData> {
        let url = self.assets_url();

        self.execute_request("create_asset", None, async {
            let response = self
                .authorized(self.http.post(&url))
                .json(request)
                .send()
                .await?;

            match response.status() {
                StatusCode::OK | StatusCode::CREATED => {
                    let body: AssetResponse = response.json().await?;
                    debug!(asset_id = %body.data.id, "Created Mux asset");
                    Ok(body.data)
                }
                status => Err(Self::handle_error_response(status, "create_asset", response).await),
            }
        })
        .await
    }

    /// Retrieve an asset.
    pub async fn get_asset(&self, asset_id: &str) -> MuxResult<AssetData> {
        let url = format!("{}/{}", self.assets_url(), sanitize_segment(asset_id));

        self.execute_request("get_asset", Some(asset_id), async {
            let response = self.authorized(self.http.get(&url)).send().await?;

            match response.status() {
                StatusCode::OK => {
                    let body: AssetResponse = response.json().await?;
                    Ok(body.data)
                }
                StatusCode::NOT_FOUND => Err(MuxError::AssetNotFound(asset_id.to_string())),
                status => Err(Self::handle_error_response(status, "get_asset", response).await),
            }
        })
        .await
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Execute a request with tracing and metrics.
    async fn execute_request<T, F>(
        &self,
        operation: &str,
        asset_id: Option<&str>,
        fut: F,
    ) -> MuxResult<T>
    where
        F: std::future::Future<Output = MuxResult<T>>,
    {
        let span = if let Some(id) = asset_id {
            info_span!("mux_request", operation = %operation, asset_id = %id)
        } else {
            info_span!("mux_request", operation = %operation)
        };

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(operation, status, latency_ms);

        result
    }

    /// The response body is kept in the error for logs; it never reaches clients.
    async fn handle_error_response(
        status: StatusCode,
        operation: &str,
        response: reqwest::Response,
    ) -> MuxError {
        let body = response.text().await.unwrap_or_default();
        MuxError::from_http_status(status.as_u16(), format!("{} failed: {}", operation, body))
    }
}

/// Asset ids are opaque; keep them from escaping the path segment.
fn sanitize_segment(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
