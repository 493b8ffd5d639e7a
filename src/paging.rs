//! Offset pagination for listing queries.
//!
//! Requests are 1-indexed and clamped on construction, so callers and
//! SQL never see a page below 1 or a page size outside `1..=MAX_PAGE_SIZE`.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on the number of items per page
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-indexed page number
    pub page: i64,
    /// Items per page
    pub page_size: i64,
}

impl PageRequest {
    /// Create a request, clamping out-of-range values
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of rows to skip for this page
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the total row count
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total rows matching the query, across all pages
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Number of pages needed to cover `total` rows
    pub fn total_pages(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            (self.total + self.page_size - 1) / self.page_size
        }
    }

    /// Whether pages beyond this one exist
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_clamps_page_and_size() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 1);

        let request = PageRequest::new(-3, 5_000);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, MAX_PAGE_SIZE);

        let request = PageRequest::new(7, 25);
        assert_eq!(request.page, 7);
        assert_eq!(request.page_size, 25);
    }

    #[test]
    fn test_default_request_starts_at_first_page() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_offset_skips_earlier_pages() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(2, 10).offset(), 10);
        assert_eq!(PageRequest::new(5, 3).offset(), 12);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<i32> = Page::new(vec![], 0, PageRequest::new(1, 10));
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_more());

        let page: Page<i32> = Page::new(vec![], 10, PageRequest::new(1, 10));
        assert_eq!(page.total_pages(), 1);
        assert!(!page.has_more());

        let page: Page<i32> = Page::new(vec![], 11, PageRequest::new(1, 10));
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_more());
    }

    #[test]
    fn test_has_more_is_false_on_last_page() {
        let page: Page<i32> = Page::new(vec![], 21, PageRequest::new(3, 10));
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_more());
    }
}
