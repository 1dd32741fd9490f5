//! Pagination and sort resolution for contact listings.

use shared::{SortBy, SortOrder};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
/// Upper bound on page size. The original contract left `limit` unbounded;
/// capping it closes off unbounded result-set requests.
pub const MAX_LIMIT: i64 = 100;

/// Resolved page window. Values are already positive and bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Applies defaults and bounds. Inputs come through validation already,
    /// but standalone callers get the same safety net.
    pub fn resolve(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    pub fn offset(self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

/// Single-field, single-direction sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub by: SortBy,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn resolve(by: Option<SortBy>, order: Option<SortOrder>) -> Self {
        Self {
            by: by.unwrap_or_default(),
            order: order.unwrap_or_default(),
        }
    }

    /// `ORDER BY` fragment. Both parts come from enums, so no request input
    /// ever reaches the SQL text.
    pub fn order_by_sql(self) -> String {
        format!("{} {}", self.by.column(), self.order.sql())
    }
}
