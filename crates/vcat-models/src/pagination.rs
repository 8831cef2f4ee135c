//! List pagination.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page a caller can ask for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Normalized page/limit pair. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Normalize raw values: page < 1 becomes 1, limit < 1 becomes the
    /// default, and limit is capped at [`MAX_PAGE_LIMIT`].
    pub fn new(page: i64, limit: i64) -> Self {
        let page = if page < 1 { 1 } else { page.min(u32::MAX as i64) as u32 };
        let limit = if limit < 1 {
            DEFAULT_PAGE_LIMIT
        } else {
            limit.min(MAX_PAGE_LIMIT as i64) as u32
        };
        Self { page, limit }
    }

    /// Build from query-string values; anything unparsable falls back to defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(1);
        let limit = limit
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_PAGE_LIMIT as i64);
        Self::new(page, limit)
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}
