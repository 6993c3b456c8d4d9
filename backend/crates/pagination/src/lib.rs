//! Page-number pagination primitives.
//!
//! The crate keeps pagination arithmetic out of adapters and views:
//!
//! - [`PageRequest`] normalises a requested page number and page size and
//!   exposes the `OFFSET`/`LIMIT` pair a storage adapter needs.
//! - [`Page`] wraps one slice of results together with the total match count
//!   and answers navigation questions (previous, next, last page).
//! - [`PageLink`] and [`page_href`] describe the controls rendered under a
//!   result list.
//!
//! Requests for a page beyond the last one are valid and simply yield an empty
//! [`Page`]; callers never receive an error for an out-of-range page.
//!
//! # Examples
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::lenient(Some("2"), 10);
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["k", "l"], request, 12);
//! assert_eq!(page.total_pages(), 2);
//! assert!(!page.has_next());
//! ```

mod links;
mod page;
mod request;

pub use links::{PageLink, page_href};
pub use page::Page;
pub use request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PaginationError};
