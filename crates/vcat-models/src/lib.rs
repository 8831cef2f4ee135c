//! Shared data models for the video catalog.
//!
//! This crate provides Serde-serializable types for:
//! - Video records and ingestion submissions
//! - Provider asset metadata and playback sources
//! - Playback policies
//! - List pagination

pub mod asset;
pub mod pagination;
pub mod policy;
pub mod video;

// Re-export common types
pub use asset::{Asset, AssetRef, PlaybackId, Source, HLS_MIME_TYPE};
pub use pagination::{PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use policy::{PlaybackPolicy, PolicyParseError};
pub use video::{NewVideo, Video, VideoId, VideoSubmission};
