//! Mux Video integration.
//!
//! This crate provides:
//! - REST client for asset creation and lookup
//! - RS256 playback token signing for restricted assets
//! - Asset gateway that derives playback URLs from asset metadata

pub mod assets;
pub mod client;
pub mod error;
pub mod metrics;
pub mod signing;
pub mod types;

pub use assets::{MuxAssets, PlaybackUrls};
pub use client::{MuxClient, MuxConfig};
pub use error::{MuxError, MuxResult};
pub use signing::{Audience, RsaUrlSigner, SignedUrlClaims, UrlSigner};
