//! Caller-owned pagination state.

use std::ops::Range;

/// Page sizes offered by the table footer.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// Page size used until the caller picks another.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page (1-based) and page size.
///
/// A page size of 0 means "no pagination": everything is on one page.
///
/// # Example
///
/// ```
/// use tablekit::pagination::Pagination;
///
/// let pagination = Pagination::new(3, 10);
/// assert_eq!(pagination.total_pages(25), 3);
/// assert_eq!(pagination.range(25), 20..25);
/// assert!(!pagination.has_next(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    /// `ceil(len / page_size)`; 0 for an empty set.
    pub fn total_pages(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else if self.page_size == 0 {
            1
        } else {
            len.div_ceil(self.page_size)
        }
    }

    /// Indices of the visible slice `[(page-1)*size, page*size)` clamped to `len`.
    pub fn range(&self, len: usize) -> Range<usize> {
        if self.page_size == 0 {
            return 0..len;
        }
        let start = (self.page.max(1) - 1)
            .saturating_mul(self.page_size)
            .min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.page < self.total_pages(len)
    }

    /// Pull the page back inside `1..=total_pages(len)`.
    ///
    /// Returns `true` if the page moved.
    pub fn clamp(&mut self, len: usize) -> bool {
        let page = self.page.clamp(1, self.total_pages(len).max(1));
        let moved = page != self.page;
        self.page = page;
        moved
    }
}

/// The page size after `current` in [`PAGE_SIZES`], wrapping around.
pub fn next_page_size(current: usize) -> usize {
    let idx = PAGE_SIZES.iter().position(|&s| s == current);
    match idx {
        Some(i) => PAGE_SIZES[(i + 1) % PAGE_SIZES.len()],
        None => PAGE_SIZES[0],
    }
}

/// The page size before `current` in [`PAGE_SIZES`], wrapping around.
pub fn previous_page_size(current: usize) -> usize {
    let idx = PAGE_SIZES.iter().position(|&s| s == current);
    match idx {
        Some(0) | None => PAGE_SIZES[PAGE_SIZES.len() - 1],
        Some(i) => PAGE_SIZES[i - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_slice() {
        let pagination = Pagination::new(1, 10);
        assert_eq!(pagination.range(25), 0..10);
        assert!(!pagination.has_previous());
        assert!(pagination.has_next(25));
    }

    #[test]
    fn test_last_page_holds_between_one_and_size() {
        for size in [1, 3, 10, 20, 50, 100] {
            for len in 1..=130 {
                let total = Pagination::new(1, size).total_pages(len);
                assert_eq!(total, len.div_ceil(size));
                let last = Pagination::new(total, size).range(len);
                assert!((1..=size).contains(&last.len()), "size {size}, len {len}");
            }
        }
    }

    #[test]
    fn test_zero_page_size_is_single_page() {
        let pagination = Pagination::new(1, 0);
        assert_eq!(pagination.total_pages(7), 1);
        assert_eq!(pagination.range(7), 0..7);
        assert!(!pagination.has_next(7));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        assert_eq!(Pagination::new(9, 10).range(25), 25..25);
    }

    #[test]
    fn test_empty_set_has_no_pages() {
        assert_eq!(Pagination::default().total_pages(0), 0);
    }

    #[test]
    fn test_clamp_pulls_page_back() {
        let mut pagination = Pagination::new(3, 10);
        assert!(pagination.clamp(20));
        assert_eq!(pagination.page, 2);
        assert!(!pagination.clamp(20));

        pagination.page = 4;
        assert!(pagination.clamp(0));
        assert_eq!(pagination.page, 1);

        pagination.page = 0;
        assert!(pagination.clamp(5));
        assert_eq!(pagination.page, 1);
    }

    #[test]
    fn test_page_size_cycle() {
        assert_eq!(next_page_size(10), 20);
        assert_eq!(next_page_size(100), 10);
        assert_eq!(next_page_size(7), 10);
        assert_eq!(previous_page_size(10), 100);
        assert_eq!(previous_page_size(50), 20);
    }
}
