//! Pagination window math and next/previous descriptors.

use camp_derive::api_model;

/// Default page number when the client sends none.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when the client sends none.
pub const DEFAULT_LIMIT: u64 = 2;

/// A pointer to an adjacent page.
#[api_model]
pub struct PageDescriptor {
    pub page: u64,
    pub limit: u64,
}

/// Next/previous descriptors for the response envelope.
///
/// `next` is present iff records exist past the current window; `prev` iff the
/// window starts past the first record.
#[api_model]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageDescriptor>,
}

/// The record window requested by a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl PageWindow {
    /// Builds a window, normalizing zero values to the defaults.
    ///
    /// No upper bound is enforced; a page beyond the data simply yields an
    /// empty result set.
    #[must_use]
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// Zero-based index of the first record in the window.
    #[must_use]
    pub const fn start_index(self) -> u64 {
        (self.page - 1) * self.limit
    }

    /// Zero-based index one past the last record in the window.
    #[must_use]
    pub const fn end_index(self) -> u64 {
        self.page * self.limit
    }

    /// Computes the next/previous descriptors for a total record count.
    #[must_use]
    pub fn describe(self, total: u64) -> Pagination {
        let next = (self.end_index() < total)
            .then(|| PageDescriptor { page: self.page + 1, limit: self.limit });
        let prev = (self.start_index() > 0)
            .then(|| PageDescriptor { page: self.page - 1, limit: self.limit });

        Pagination { next, prev }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_math_is_exact() {
        for page in 1..=7u64 {
            for limit in 1..=5u64 {
                let window = PageWindow::new(page, limit);
                assert_eq!(window.start_index(), (page - 1) * limit);
                assert_eq!(window.end_index(), page * limit);
            }
        }
    }

    #[test]
    fn zero_values_normalize_to_defaults() {
        let window = PageWindow::new(0, 0);
        assert_eq!(window, PageWindow::default());
        assert_eq!(window.page, DEFAULT_PAGE);
        assert_eq!(window.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn first_page_of_five_records_has_only_next() {
        let pagination = PageWindow::new(1, 2).describe(5);
        assert_eq!(pagination.next.map(|d| (d.page, d.limit)), Some((2, 2)));
        assert!(pagination.prev.is_none());
    }

    #[test]
    fn last_partial_page_has_only_prev() {
        let pagination = PageWindow::new(3, 2).describe(5);
        assert!(pagination.next.is_none());
        assert_eq!(pagination.prev.map(|d| (d.page, d.limit)), Some((2, 2)));
    }

    #[test]
    fn middle_page_has_both() {
        let pagination = PageWindow::new(2, 2).describe(5);
        assert_eq!(pagination.next.map(|d| d.page), Some(3));
        assert_eq!(pagination.prev.map(|d| d.page), Some(1));
    }

    #[test]
    fn exact_fit_has_no_next() {
        let pagination = PageWindow::new(2, 2).describe(4);
        assert!(pagination.next.is_none());
        assert_eq!(pagination.prev.map(|d| d.page), Some(1));
    }

    #[test]
    fn page_beyond_data_is_not_an_error() {
        let window = PageWindow::new(9, 10);
        let pagination = window.describe(5);
        assert!(pagination.next.is_none());
        assert_eq!(pagination.prev.map(|d| d.page), Some(8));
    }

    #[test]
    fn absent_descriptors_are_omitted_from_json() {
        let json = serde_json::to_value(PageWindow::new(1, 2).describe(1)).expect("to json");
        assert_eq!(json, serde_json::json!({}));
    }
}
