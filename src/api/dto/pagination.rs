//! Lenient pagination query parameters.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 5;
/// Substituted for a `limit` that is unparsable or outside `1..=MAX_LIMIT`.
pub const FALLBACK_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Raw `page` / `limit` query values.
///
/// Kept as strings so malformed input falls back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,
}

/// Resolved page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PaginationParams {
    /// Resolves the parameters.
    ///
    /// # Rules
    ///
    /// - `page`: default 1; unparsable or < 1 becomes 1
    /// - `limit`: default 5; unparsable or outside 1..=100 becomes 10
    pub fn resolve(&self) -> PageRequest {
        let page = match self.page.as_deref().map(str::trim) {
            None => 1,
            Some(raw) => raw.parse::<i64>().ok().filter(|p| *p >= 1).unwrap_or(1),
        };

        let per_page = match self.limit.as_deref().map(str::trim) {
            None => DEFAULT_LIMIT,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|l| (1..=MAX_LIMIT).contains(l))
                .unwrap_or(FALLBACK_LIMIT),
        };

        PageRequest { page, per_page }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Pagination metadata returned alongside list results.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(request: PageRequest, total_items: i64) -> Self {
        let total_pages = (total_items + request.per_page - 1) / request.per_page;
        Self {
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}
