//! Normalised page requests.

use std::num::IntErrorKind;

use serde::Serialize;

/// Page size used when callers do not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a request may carry.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised when a page request is constructed strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page numbers start at one.
    #[error("page number must be at least 1, got {page}")]
    InvalidPage {
        /// The rejected page number.
        page: u32,
    },
    /// Page size is zero or above [`MAX_PAGE_SIZE`].
    #[error("page size must be between 1 and {max}, got {size}", max = MAX_PAGE_SIZE)]
    InvalidPageSize {
        /// The rejected page size.
        size: u32,
    },
}

/// A one-based page number paired with a page size.
///
/// ## Invariants
/// - `page >= 1`.
/// - `1 <= per_page <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request, rejecting out-of-range values.
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidPage`] when `page` is zero and
    /// [`PaginationError::InvalidPageSize`] when `per_page` is outside
    /// `1..=MAX_PAGE_SIZE`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PaginationError};
    ///
    /// assert!(PageRequest::new(1, 10).is_ok());
    /// assert_eq!(
    ///     PageRequest::new(0, 10),
    ///     Err(PaginationError::InvalidPage { page: 0 })
    /// );
    /// ```
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage { page });
        }
        if per_page == 0 || per_page > MAX_PAGE_SIZE {
            return Err(PaginationError::InvalidPageSize { size: per_page });
        }
        Ok(Self { page, per_page })
    }

    /// Build a request from a raw query-string value.
    ///
    /// Missing, unparsable, zero or negative page numbers fall back to page
    /// one. Numbers too large for `u32` saturate to `u32::MAX`, which lies
    /// past any real last page. The page size is clamped into
    /// `1..=MAX_PAGE_SIZE`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::lenient(Some("3"), 10).page(), 3);
    /// assert_eq!(PageRequest::lenient(Some("-2"), 10).page(), 1);
    /// assert_eq!(PageRequest::lenient(Some("abc"), 10).page(), 1);
    /// assert_eq!(PageRequest::lenient(None, 10).page(), 1);
    /// ```
    #[must_use]
    pub fn lenient(raw_page: Option<&str>, per_page: u32) -> Self {
        let page = raw_page.map_or(1, parse_page_number);
        Self {
            page,
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1).saturating_mul(u64::from(self.per_page))
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Same page size, different page number.
    ///
    /// A zero page number is treated as page one.
    #[must_use]
    pub fn with_page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }
}

fn parse_page_number(raw: &str) -> u32 {
    match raw.trim().parse::<u32>() {
        Ok(0) => 1,
        Ok(page) => page,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u32::MAX,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for request normalisation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("1"), 1)]
    #[case(Some("7"), 7)]
    #[case(Some(" 4 "), 4)]
    #[case(Some("0"), 1)]
    #[case(Some("-1"), 1)]
    #[case(Some("2.5"), 1)]
    #[case(Some(""), 1)]
    #[case(Some("4294967296"), u32::MAX)]
    #[case(Some("99999999999999999999"), u32::MAX)]
    #[case(Some("-4294967296"), 1)]
    #[case(None, 1)]
    fn lenient_parsing_falls_back_to_first_page(#[case] raw: Option<&str>, #[case] page: u32) {
        assert_eq!(PageRequest::lenient(raw, DEFAULT_PAGE_SIZE).page(), page);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(10, 10)]
    #[case(500, MAX_PAGE_SIZE)]
    fn lenient_clamps_page_size(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(PageRequest::lenient(None, requested).per_page(), expected);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 10)]
    #[case(5, 40)]
    fn offset_skips_preceding_pages(#[case] page: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, 10).expect("valid request");
        assert_eq!(request.offset(), offset);
        assert_eq!(request.limit(), 10);
    }

    #[rstest]
    fn offset_saturates_for_huge_pages() {
        let request = PageRequest::new(u32::MAX, MAX_PAGE_SIZE).expect("valid request");
        assert_eq!(
            request.offset(),
            u64::from(u32::MAX - 1) * u64::from(MAX_PAGE_SIZE)
        );
    }

    #[rstest]
    #[case(0, 10, PaginationError::InvalidPage { page: 0 })]
    #[case(1, 0, PaginationError::InvalidPageSize { size: 0 })]
    #[case(1, 101, PaginationError::InvalidPageSize { size: 101 })]
    fn strict_constructor_rejects_out_of_range(
        #[case] page: u32,
        #[case] per_page: u32,
        #[case] expected: PaginationError,
    ) {
        assert_eq!(PageRequest::new(page, per_page), Err(expected));
    }

    #[rstest]
    fn with_page_keeps_size() {
        let request = PageRequest::new(3, 25).expect("valid request").with_page(0);
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 25);
    }
}
