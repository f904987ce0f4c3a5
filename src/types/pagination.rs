//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::EventResponse;

/// Pagination query parameters, reusable across all list endpoints.
///
/// `page` is 0-indexed, matching the wire contract.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageParams {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Get limit clamped to a sane range (at least one row, capped maximum)
    pub fn limit(&self) -> u64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Page descriptor returned by list endpoints: one bounded slice of an
/// ordered result set plus its pagination metadata.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[aliases(EventPageResponse = PageResponse<EventResponse>)]
pub struct PageResponse<T: ToSchema<'static>> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl<T: ToSchema<'static>> PageResponse<T> {
    /// Create a page descriptor from one fetched slice and the total count.
    ///
    /// An empty result set reports itself as both first and last page.
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size > 0 {
            (total_elements + size - 1) / size
        } else {
            0
        };

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: page + 1 >= total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_metadata_math() {
        let page: PageResponse<i32> = PageResponse::new(vec![1, 2, 3], 0, 3, 7);
        assert_eq!(page.total_pages, 3);
        assert!(page.first);
        assert!(!page.last);

        let page: PageResponse<i32> = PageResponse::new(vec![7], 2, 3, 7);
        assert_eq!(page.total_pages, 3);
        assert!(!page.first);
        assert!(page.last);
    }

    #[test]
    fn empty_result_is_first_and_last() {
        let page: PageResponse<i32> = PageResponse::new(vec![], 0, 10, 0);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageParams::new(0, 0).limit(), 1);
        assert_eq!(PageParams::new(0, 10_000).limit(), MAX_PAGE_SIZE);
        assert_eq!(PageParams::new(0, 25).limit(), 25);
    }

    #[test]
    fn defaults_apply() {
        let params = PageParams::default();
        assert_eq!(params.page, 0);
        assert_eq!(params.size, 10);
    }

    #[test]
    fn serializes_camel_case_field_names() {
        let page: PageResponse<i32> = PageResponse::new(vec![], 1, 5, 0);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("totalElements").is_some());
        assert!(json.get("totalPages").is_some());
        assert!(json.get("first").is_some());
        assert!(json.get("last").is_some());
    }
}
