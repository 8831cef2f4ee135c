//! Signed playback URL tokens.
//!
//! Restricted (`signed` policy) playback ids only serve requests carrying an
//! RS256 JWT minted with a Mux signing key. Each token is scoped to one
//! purpose through its audience: `v` for the HLS manifest, `t` for thumbnail
//! images. Thumbnail tokens also pin the capture time and output size.
//!
//! Token lifetime is `round(duration * 1.6)` seconds from issue. A zero or
//! negative duration produces a token that is already expired (or expires
//! immediately); no minimum lifetime is applied.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{MuxError, MuxResult};
use crate::metrics::record_token_signed;

/// Thumbnail capture time, in seconds into the asset.
pub const THUMBNAIL_TIME_SECS: u32 = 7;

/// Multiplier from asset duration to token lifetime.
const EXPIRY_FACTOR: f64 = 1.6;

/// Purpose a token is valid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// HLS manifest and segments.
    Video,
    /// Thumbnail and poster images.
    Thumbnail,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Video => "v",
            Audience::Thumbnail => "t",
        }
    }
}

/// Token lifetime in seconds for an asset of `duration_secs`. Saturates at
/// the `i64` range; NaN yields zero.
pub fn expiry_offset_secs(duration_secs: f64) -> i64 {
    (duration_secs * EXPIRY_FACTOR).round() as i64
}

/// JWT claims of a playback token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedUrlClaims {
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub kid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smart_crop: Option<bool>,
}

impl SignedUrlClaims {
    /// Build claims issued at `issued_at` (unix seconds).
    ///
    /// `width`/`height` only apply to [`Audience::Thumbnail`].
    pub fn new(
        playback_id: &str,
        audience: Audience,
        duration_secs: f64,
        width: u32,
        height: u32,
        key_id: &str,
        issued_at: i64,
    ) -> Self {
        let mut claims = Self {
            sub: playback_id.to_string(),
            aud: audience.as_str().to_string(),
            exp: issued_at.saturating_add(expiry_offset_secs(duration_secs)),
            kid: key_id.to_string(),
            time: None,
            width: None,
            height: None,
            smart_crop: None,
        };

        if audience == Audience::Thumbnail {
            claims.time = Some(THUMBNAIL_TIME_SECS);
            claims.width = Some(width);
            claims.height = Some(height);
            claims.smart_crop = Some(true);
        }

        claims
    }
}

/// Mints playback tokens.
#[cfg_attr(test, mockall::automock)]
pub trait UrlSigner: Send + Sync {
    /// Sign a token for `playback_id`. Pure CPU work, no I/O.
    fn sign(
        &self,
        playback_id: &str,
        audience: Audience,
        duration_secs: f64,
        width: u32,
        height: u32,
    ) -> MuxResult<String>;
}

/// RS256 signer backed by a Mux signing key.
///
/// The key is decoded on every call, so malformed key material fails each
/// signing attempt rather than process startup.
#[derive(Clone)]
pub struct RsaUrlSigner {
    key_id: String,
    key_secret: String,
}

impl fmt::Debug for RsaUrlSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaUrlSigner")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[redacted]")
            .finish()
    }
}

impl RsaUrlSigner {
    /// `key_secret` is the base64 of a PEM RSA private key, as Mux issues it.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    fn encoding_key(&self) -> MuxResult<EncodingKey> {
        let pem = STANDARD
            .decode(self.key_secret.trim())
            .map_err(|e| MuxError::KeyDecode(e.to_string()))?;

        EncodingKey::from_rsa_pem(&pem).map_err(|e| MuxError::KeyParse(e.to_string()))
    }

    /// Sign prebuilt claims.
    pub fn sign_claims(&self, claims: &SignedUrlClaims) -> MuxResult<String> {
        let key = self.encoding_key()?;

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key_id.clone());

        let token = encode(&header, claims, &key).map_err(|e| MuxError::Signing(e.to_string()))?;
        record_token_signed(&claims.aud);
        Ok(token)
    }
}

impl UrlSigner for RsaUrlSigner {
    fn sign(
        &self,
        playback_id: &str,
        audience: Audience,
        duration_secs: f64,
        width: u32,
        height: u32,
    ) -> MuxResult<String> {
        let claims = SignedUrlClaims::new(
            playback_id,
            audience,
            duration_secs,
            width,
            height,
            &self.key_id,
            Utc::now().timestamp(),
        );
        self.sign_claims(&claims)
    }
}

// =============================================================================
// Tests
// =============================================================================
