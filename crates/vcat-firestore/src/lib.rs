//! Firestore REST API client.
//!
//! This crate provides:
//! - A typed repository for catalog videos
//! - Service account authentication via gcp_auth, or the emulator token
//! - Structured queries with ordering and offset pagination
//! - Retry with backoff on reads

pub mod client;
pub mod error;
pub mod metrics;
pub mod repos;
pub mod retry;
pub mod token_cache;
pub mod types;

#[cfg(test)]
mod client_tests;

pub use client::{FirestoreClient, FirestoreConfig};
pub use error::{FirestoreError, FirestoreResult};
pub use repos::VideoRepository;
pub use retry::RetryConfig;
pub use types::{Direction, Document, FromFirestoreValue, StructuredQuery, ToFirestoreValue, Value};
