//! Pagination query and envelope
//!
//! Every list endpoint takes the same `page`/`limit` query parameters
//! and answers with the same envelope. The envelope is what gets cached,
//! so both sides derive Serialize and Deserialize.

use serde::{Deserialize, Serialize};

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    40
}

// == Page Query ==
/// Query parameters of a list request, 1-based page numbering.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageQuery {
    /// Returns an error message if the parameters are out of range.
    pub fn validate(&self) -> Option<String> {
        if self.page < 1 {
            return Some("Page must be at least 1".to_string());
        }
        if self.limit < 1 {
            return Some("Limit must be at least 1".to_string());
        }
        None
    }

    /// Number of items to skip for this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 1, limit: 40 }
    }
}

// == Page Envelope ==
/// One page of results plus the counts a client needs for paging UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Wraps `items` for the given query. `total_pages` rounds up, so a
    /// final partial page counts as a page.
    pub fn new(items: Vec<T>, query: &PageQuery, total_items: u64) -> Self {
        Self {
            items,
            current_page: query.page,
            limit: query.limit,
            total_items,
            total_pages: total_items.div_ceil(query.limit),
        }
    }
}
