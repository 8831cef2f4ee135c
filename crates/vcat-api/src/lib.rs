//! Axum HTTP API for the video catalog.
//!
//! This crate provides:
//! - Ingestion and delivery services over the video store and asset gateway
//! - REST handlers with a uniform JSON error envelope
//! - Rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{AssetGateway, DeliveryService, IngestionService, ServiceError, VideoStore};
pub use state::AppState;
