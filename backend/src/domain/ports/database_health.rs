//! Driven port probing database reachability for the health endpoint.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Reasons the database probe failed.
    pub enum DatabaseHealthError {
        /// No connection could be checked out.
        Connection { message: String } => "database connection failed: {message}",
        /// The probe query failed.
        Query { message: String } => "database probe query failed: {message}",
    }
}

#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Run a trivial round trip against the database.
    async fn ping(&self) -> Result<(), DatabaseHealthError>;
}

/// Probe for deployments without a database; always healthy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDatabaseHealth;

#[async_trait]
impl DatabaseHealth for FixtureDatabaseHealth {
    async fn ping(&self) -> Result<(), DatabaseHealthError> {
        Ok(())
    }
}
