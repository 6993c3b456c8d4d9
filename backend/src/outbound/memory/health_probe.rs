//! `DatabaseHealth` for the in-memory adapters.

use async_trait::async_trait;

use crate::domain::ports::{DatabaseHealth, DatabaseHealthError};

/// Always healthy: in-process storage has no connection to lose.
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryHealthProbe;

#[async_trait]
impl DatabaseHealth for InMemoryHealthProbe {
    async fn ping(&self) -> Result<(), DatabaseHealthError> {
        Ok(())
    }
}
