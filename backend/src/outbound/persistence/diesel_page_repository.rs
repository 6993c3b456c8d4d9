//! PostgreSQL-backed `PageRepository` implementation using Diesel ORM.
//!
//! Search runs the count and the page slice inside one read-only
//! `REPEATABLE READ` transaction, so the total and the items come from the
//! same snapshot.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{PagePersistenceError, PageRepository};
use crate::domain::{ContentPage, PageId, SearchQuery, Slug};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::PageRow;
use super::pool::{DbPool, PoolError};
use super::schema::pages;

/// Diesel-backed implementation of the page repository port.
#[derive(Clone)]
pub struct DieselPageRepository {
    pool: DbPool,
}

impl DieselPageRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PagePersistenceError {
    map_basic_pool_error(error, PagePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PagePersistenceError {
    map_basic_diesel_error(
        error,
        PagePersistenceError::query,
        PagePersistenceError::connection,
    )
}

fn row_to_page(row: PageRow) -> Result<ContentPage, PagePersistenceError> {
    let slug = Slug::new(row.slug)
        .map_err(|err| PagePersistenceError::query(format!("invalid page slug: {err}")))?;
    Ok(ContentPage {
        id: PageId::new(row.id),
        title: row.title,
        slug,
        content: row.content,
        topic: row.topic,
        is_published: row.is_published,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_sql_bound(value: u64, what: &str) -> Result<i64, PagePersistenceError> {
    i64::try_from(value).map_err(|_| PagePersistenceError::query(format!("{what} overflows i64")))
}

#[async_trait]
impl PageRepository for DieselPageRepository {
    async fn search_published(
        &self,
        query: &SearchQuery,
        request: PageRequest,
    ) -> Result<Page<ContentPage>, PagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = query.like_pattern();
        let offset = to_sql_bound(request.offset(), "offset")?;
        let limit = to_sql_bound(request.limit(), "limit")?;

        let (total, rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let matching = pages::is_published.eq(true).and(
                        pages::title
                            .ilike(pattern.as_str())
                            .or(pages::content.ilike(pattern.as_str())),
                    );
                    let total: i64 = pages::table
                        .filter(matching.clone())
                        .count()
                        .get_result(conn)
                        .await?;
                    let rows: Vec<PageRow> = pages::table
                        .filter(matching)
                        .order(pages::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .select(PageRow::as_select())
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total)
            .map_err(|_| PagePersistenceError::query("negative search count"))?;
        let items = rows
            .into_iter()
            .map(row_to_page)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, request, total))
    }

    async fn find_published(
        &self,
        slug: &Slug,
    ) -> Result<Option<ContentPage>, PagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = pages::table
            .filter(pages::slug.eq(slug.as_ref()))
            .filter(pages::is_published.eq(true))
            .select(PageRow::as_select())
            .first::<PageRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_page).transpose()
    }

    async fn list_all(&self) -> Result<Vec<ContentPage>, PagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PageRow> = pages::table
            .order(pages::id.asc())
            .select(PageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_page).collect()
    }
}
