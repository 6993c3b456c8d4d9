//! Port abstraction for contact inquiry storage.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ContactSubmission, Inquiry};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by inquiry repository adapters.
    pub enum InquiryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "inquiry repository connection failed: {message}",
        /// Query or mutation failed; nothing was written.
        Query { message: String } => "inquiry repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Store a submission with status `new`.
    ///
    /// The write is atomic: on error no partial record remains.
    async fn insert(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<Inquiry, InquiryPersistenceError>;

    /// Every inquiry, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Inquiry>, InquiryPersistenceError>;
}
