//! In-process `InquiryRepository`.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{InquiryPersistenceError, InquiryRepository};
use crate::domain::{ContactSubmission, Inquiry, InquiryId, InquiryStatus};

/// Inquiries in insertion order with sequential ids.
#[derive(Debug, Default)]
pub struct InMemoryInquiryRepository {
    inquiries: Mutex<Vec<Inquiry>>,
}

impl InMemoryInquiryRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> InquiryPersistenceError {
    InquiryPersistenceError::query("inquiry store lock poisoned")
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn insert(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<Inquiry, InquiryPersistenceError> {
        let mut inquiries = self.inquiries.lock().map_err(poisoned)?;
        let next_id = inquiries.last().map_or(1, |last| last.id.get() + 1);
        let inquiry = Inquiry {
            id: InquiryId::new(next_id),
            name: submission.name().to_owned(),
            email: submission.email().to_owned(),
            subject: submission.subject().to_owned(),
            message: submission.message().to_owned(),
            submitted_at,
            status: InquiryStatus::New,
        };
        inquiries.push(inquiry.clone());
        Ok(inquiry)
    }

    async fn list_newest_first(&self) -> Result<Vec<Inquiry>, InquiryPersistenceError> {
        let mut listed = self.inquiries.lock().map_err(poisoned)?.clone();
        listed.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(listed)
    }
}
