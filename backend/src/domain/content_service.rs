//! Content lookups and keyword search over published pages.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use tracing::{error, info};

use crate::domain::ports::{ContentQuery, PagePersistenceError, PageRepository};
use crate::domain::{ContentPage, Error, SearchOutcome, SearchQuery, Slug};

/// Content service implementing the [`ContentQuery`] driving port.
#[derive(Clone)]
pub struct ContentService<P> {
    pages: Arc<P>,
}

impl<P> ContentService<P> {
    /// Create a service over a page repository.
    pub fn new(pages: Arc<P>) -> Self {
        Self { pages }
    }
}

fn map_page_error(error: PagePersistenceError) -> Error {
    match error {
        PagePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("page repository unavailable: {message}"))
        }
        PagePersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl<P> ContentQuery for ContentService<P>
where
    P: PageRepository,
{
    async fn search(&self, query: SearchQuery, request: PageRequest) -> SearchOutcome {
        if query.is_empty() {
            return SearchOutcome::empty(query, request);
        }

        match self.pages.search_published(&query, request).await {
            Ok(results) => {
                info!(
                    query = query.as_str(),
                    page = request.page(),
                    total = results.total(),
                    "search completed"
                );
                SearchOutcome {
                    query,
                    results,
                    notice: None,
                }
            }
            Err(err) => {
                error!(query = query.as_str(), error = %err, "search failed");
                SearchOutcome::unavailable(query, request)
            }
        }
    }

    async fn find_page(&self, slug: &Slug) -> Result<Option<ContentPage>, Error> {
        self.pages.find_published(slug).await.map_err(|err| {
            error!(%slug, error = %err, "page lookup failed");
            map_page_error(err)
        })
    }
}
