//! In-process `PageRepository` over a fixed page list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};

use crate::domain::ports::{PagePersistenceError, PageRepository};
use crate::domain::{ContentPage, PageId, SearchQuery, Slug};

/// Read-only pages kept in id order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPageRepository {
    pages: Vec<ContentPage>,
}

impl InMemoryPageRepository {
    /// Repository over `pages`, sorted by id.
    pub fn new(mut pages: Vec<ContentPage>) -> Self {
        pages.sort_by_key(|page| page.id);
        Self { pages }
    }

    /// A handful of published pages for local development.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in slug is invalid.
    pub fn seeded() -> Result<Self, PagePersistenceError> {
        let seed = [
            (
                "Oksekødets klimaaftryk",
                "oksekodets-klimaaftryk",
                "Oksekød udleder omkring 27 kg CO2e pr. kg og er blandt de mest klimabelastende fødevarer.",
                "emissioner",
            ),
            (
                "Hvad er økologi?",
                "hvad-er-okologi",
                "Økologisk landbrug bygger på principper om sundhed, økologi, retfærdighed og forsigtighed.",
                "okologi",
            ),
            (
                "Økologi i kantinen",
                "okologi-i-kantinen",
                "Det økologiske spisemærke viser hvor stor en andel af råvarerne i kantinen der er økologiske.",
                "okologi",
            ),
            (
                "Datadrevet klimaarbejde",
                "datadrevet-klimaarbejde",
                "Klimadata om indkøb gør det muligt at prioritere indsatsen efter de største emissioner.",
                "emissioner",
            ),
        ];
        let pages = seed
            .into_iter()
            .zip(1_i64..)
            .map(|((title, slug, content, topic), id)| {
                Ok(ContentPage {
                    id: PageId::new(id),
                    title: title.to_owned(),
                    slug: Slug::new(slug)
                        .map_err(|err| PagePersistenceError::query(err.to_string()))?,
                    content: content.to_owned(),
                    topic: topic.to_owned(),
                    is_published: true,
                    created_at: DateTime::<Utc>::UNIX_EPOCH,
                    updated_at: DateTime::<Utc>::UNIX_EPOCH,
                })
            })
            .collect::<Result<Vec<_>, PagePersistenceError>>()?;
        Ok(Self::new(pages))
    }
}

#[async_trait]
impl PageRepository for InMemoryPageRepository {
    async fn search_published(
        &self,
        query: &SearchQuery,
        request: PageRequest,
    ) -> Result<Page<ContentPage>, PagePersistenceError> {
        let hits: Vec<&ContentPage> = self
            .pages
            .iter()
            .filter(|page| page.is_published && query.matches(page))
            .collect();
        let total = u64::try_from(hits.len())
            .map_err(|_| PagePersistenceError::query("hit count overflows u64"))?;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = hits.into_iter().skip(skip).take(take).cloned().collect();
        Ok(Page::new(items, request, total))
    }

    async fn find_published(
        &self,
        slug: &Slug,
    ) -> Result<Option<ContentPage>, PagePersistenceError> {
        Ok(self
            .pages
            .iter()
            .find(|page| page.is_published && &page.slug == slug)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<ContentPage>, PagePersistenceError> {
        Ok(self.pages.clone())
    }
}
