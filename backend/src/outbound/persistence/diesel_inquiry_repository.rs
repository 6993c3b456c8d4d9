//! PostgreSQL-backed `InquiryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{InquiryPersistenceError, InquiryRepository};
use crate::domain::{ContactSubmission, Inquiry, InquiryId, InquiryStatus};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{InquiryRow, NewInquiryRow};
use super::pool::{DbPool, PoolError};
use super::schema::contact_forms;

/// Diesel-backed implementation of the inquiry repository port.
#[derive(Clone)]
pub struct DieselInquiryRepository {
    pool: DbPool,
}

impl DieselInquiryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InquiryPersistenceError {
    map_basic_pool_error(error, InquiryPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InquiryPersistenceError {
    map_basic_diesel_error(
        error,
        InquiryPersistenceError::query,
        InquiryPersistenceError::connection,
    )
}

fn row_to_inquiry(row: InquiryRow) -> Result<Inquiry, InquiryPersistenceError> {
    let status = row
        .status
        .parse::<InquiryStatus>()
        .map_err(|err| InquiryPersistenceError::query(err.to_string()))?;
    Ok(Inquiry {
        id: InquiryId::new(row.id),
        name: row.name,
        email: row.email,
        subject: row.subject,
        message: row.message,
        submitted_at: row.submitted_at,
        status,
    })
}

#[async_trait]
impl InquiryRepository for DieselInquiryRepository {
    async fn insert(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<Inquiry, InquiryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewInquiryRow {
            name: submission.name(),
            email: submission.email(),
            subject: submission.subject(),
            message: submission.message(),
            submitted_at,
            status: InquiryStatus::New.as_str(),
        };

        let row = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(contact_forms::table)
                        .values(&new_row)
                        .returning(InquiryRow::as_returning())
                        .get_result::<InquiryRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        row_to_inquiry(row)
    }

    async fn list_newest_first(&self) -> Result<Vec<Inquiry>, InquiryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<InquiryRow> = contact_forms::table
            .order((contact_forms::submitted_at.desc(), contact_forms::id.desc()))
            .select(InquiryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_inquiry).collect()
    }
}
