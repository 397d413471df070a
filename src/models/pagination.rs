//! Paginated response envelope

use serde::Serialize;

/// Paginated response wrapper.
///
/// Listings are not paged yet: everything comes back as page 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    /// Current page number
    pub page: i64,
    /// Number of items in this page
    pub count: i64,
    /// Total number of items
    pub total: i64,
    /// List of items
    pub items: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    pub fn single_page(items: Vec<T>) -> Self {
        let len = items.len() as i64;
        Self {
            page: 1,
            count: len,
            total: len,
            items,
        }
    }
}
