use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: u32 = 25;
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters for the followed sleep records feed.
#[derive(Debug, Deserialize, IntoParams, Default)]
pub struct FeedQuery {
    /// Page number (starts at 1)
    #[param(default = 1)]
    pub page: Option<i64>,
    /// Number of items per page (capped at 100)
    #[param(default = 25)]
    pub limit: Option<i64>,
}

impl FeedQuery {
    /// Page coerced to at least 1; nonsense values fall back to the first page.
    pub fn page(&self) -> u32 {
        self.page
            .unwrap_or(1)
            .clamp(1, u32::MAX as i64) as u32
    }

    /// Limit coerced into 1..=100, defaulting to 25.
    pub fn limit(&self) -> u32 {
        match self.limit {
            Some(limit) if limit > 0 => limit.min(MAX_LIMIT as i64) as u32,
            _ => DEFAULT_LIMIT,
        }
    }
}

/// `ceil(total_count / limit)`, with an empty set yielding zero pages.
pub fn total_pages(total_count: i64, limit: u32) -> u32 {
    ((total_count as f64) / (limit as f64)).ceil() as u32
}
