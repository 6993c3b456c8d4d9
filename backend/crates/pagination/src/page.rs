//! One page of results plus navigation metadata.

use serde::Serialize;

use crate::links::PageLink;
use crate::request::PageRequest;

/// Pages shown either side of the current page in [`Page::links`].
const LINK_WINDOW: u32 = 2;

/// A slice of results for one [`PageRequest`].
///
/// `total` counts every matching item, not just those on this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    request: PageRequest,
    total: u64,
}

impl<T> Page<T> {
    /// Wrap items fetched for `request` out of `total` matches.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            request,
            total,
        }
    }

    /// An empty first page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Current one-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.request.page()
    }

    /// Total number of matching items across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages needed to show every match; zero when nothing matched.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(self.request.limit());
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether the requested page lies past the last page.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.page() > self.total_pages()
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.request.page() > 1
    }

    /// Whether a following page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page() < self.total_pages()
    }

    /// Previous page number, if any.
    #[must_use]
    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev().then(|| self.page().saturating_sub(1))
    }

    /// Next page number, if any.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page().saturating_add(1))
    }

    /// Page links for navigation controls.
    ///
    /// Always includes the first and last pages and a window around the
    /// current page; skipped runs collapse into [`PageLink::Gap`]. Returns no
    /// links when everything fits on a single page.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageLink, PageRequest};
    ///
    /// let request = PageRequest::new(6, 10).expect("valid request");
    /// let page = Page::new(Vec::<u8>::new(), request, 120);
    /// let links = page.links();
    /// assert_eq!(links.first(), Some(&PageLink::Number(1)));
    /// assert_eq!(links.get(1), Some(&PageLink::Gap));
    /// assert!(links.contains(&PageLink::Current(6)));
    /// assert_eq!(links.last(), Some(&PageLink::Number(12)));
    /// ```
    #[must_use]
    pub fn links(&self) -> Vec<PageLink> {
        let last = self.total_pages();
        if last <= 1 {
            return Vec::new();
        }
        let current = self.page();
        let window_start = current.saturating_sub(LINK_WINDOW).max(1);
        let window_end = current.saturating_add(LINK_WINDOW).min(last);

        let mut links = Vec::new();
        let mut previous: Option<u32> = None;
        for number in 1..=last {
            let in_window = number >= window_start && number <= window_end;
            if !(number == 1 || number == last || in_window) {
                continue;
            }
            if previous.is_some_and(|prev| number > prev + 1) {
                links.push(PageLink::Gap);
            }
            links.push(if number == current {
                PageLink::Current(number)
            } else {
                PageLink::Number(number)
            });
            previous = Some(number);
        }
        links
    }

    /// Transform the items while keeping the pagination metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            request: self.request,
            total: self.total,
        }
    }
}
