//! Mux metrics collection.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total Mux API requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "mux_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "mux_latency_seconds";

    /// Signed playback tokens minted, by audience.
    pub const TOKENS_SIGNED_TOTAL: &str = "mux_tokens_signed_total";
}

/// Record metrics for a completed Mux API request.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

/// Record a minted token.
pub fn record_token_signed(audience: &str) {
    counter!(
        names::TOKENS_SIGNED_TOTAL,
        "audience" => audience.to_string()
    )
    .increment(1);
}
