//! Driving port for content lookups and keyword search.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::{ContentPage, Error, PageId, SearchOutcome, SearchQuery, Slug};

/// Domain use-case port for reading published content.
#[async_trait]
pub trait ContentQuery: Send + Sync {
    /// Search published pages.
    ///
    /// Never fails: storage problems surface as an empty result with a
    /// notice on the returned [`SearchOutcome`].
    async fn search(&self, query: SearchQuery, request: PageRequest) -> SearchOutcome;

    /// Resolve a published page by slug.
    async fn find_page(&self, slug: &Slug) -> Result<Option<ContentPage>, Error>;
}

/// Single published fixture page about beef emissions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContentQuery;

impl FixtureContentQuery {
    fn page() -> Result<ContentPage, Error> {
        Ok(ContentPage {
            id: PageId::new(1),
            title: "Oksekødets klimaaftryk".to_owned(),
            slug: Slug::new("oksekodets-klimaaftryk")
                .map_err(|err| Error::internal(format!("invalid fixture slug: {err}")))?,
            content: "Oksekød udleder omkring 27 kg CO2e pr. kg.".to_owned(),
            topic: "emissioner".to_owned(),
            is_published: true,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        })
    }
}

#[async_trait]
impl ContentQuery for FixtureContentQuery {
    async fn search(&self, query: SearchQuery, request: PageRequest) -> SearchOutcome {
        let Ok(page) = Self::page() else {
            return SearchOutcome::unavailable(query, request);
        };
        let hits: Vec<_> = std::iter::once(page)
            .filter(|page| query.matches(page))
            .collect();
        let total = u64::try_from(hits.len()).unwrap_or(u64::MAX);
        let items = if request.page() == 1 { hits } else { Vec::new() };
        SearchOutcome {
            query,
            results: Page::new(items, request, total),
            notice: None,
        }
    }

    async fn find_page(&self, slug: &Slug) -> Result<Option<ContentPage>, Error> {
        let page = Self::page()?;
        Ok((&page.slug == slug).then_some(page))
    }
}
