//! PostgreSQL-backed `DatabaseHealth` probe.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DatabaseHealth, DatabaseHealthError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::DbPool;

/// Checks out a pooled connection and runs `SELECT 1`.
#[derive(Clone)]
pub struct DieselHealthProbe {
    pool: DbPool,
}

impl DieselHealthProbe {
    /// Create a probe over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealth for DieselHealthProbe {
    async fn ping(&self) -> Result<(), DatabaseHealthError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, DatabaseHealthError::connection))?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    DatabaseHealthError::query,
                    DatabaseHealthError::connection,
                )
            })
    }
}
