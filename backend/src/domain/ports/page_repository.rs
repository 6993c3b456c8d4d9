//! Port abstraction for content page storage.
use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{ContentPage, SearchQuery, Slug};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by page repository adapters.
    pub enum PagePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "page repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "page repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Published pages whose title or content contains `query`, ignoring
    /// case, in id order.
    ///
    /// A page beyond the last yields an empty slice with the true total.
    async fn search_published(
        &self,
        query: &SearchQuery,
        request: PageRequest,
    ) -> Result<Page<ContentPage>, PagePersistenceError>;

    /// A published page by slug.
    async fn find_published(&self, slug: &Slug) -> Result<Option<ContentPage>, PagePersistenceError>;

    /// Every page, published or not, in id order.
    async fn list_all(&self) -> Result<Vec<ContentPage>, PagePersistenceError>;
}
