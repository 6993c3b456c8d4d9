//! Driving port for contact form submissions.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{ContactSubmission, Error, Inquiry, InquiryId, InquiryStatus};

/// Message flashed after a stored submission.
pub const CONTACT_THANKS_MESSAGE: &str = "Tak for din besked! Vi vender tilbage hurtigst muligt.";
/// Message flashed when the submission could not be stored.
pub const CONTACT_FAILED_MESSAGE: &str = "Der opstod en fejl. Prøv igen senere.";

/// Domain use-case port for receiving inquiries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactIntake: Send + Sync {
    /// Persist a validated submission with status `new`.
    async fn submit(&self, submission: &ContactSubmission) -> Result<Inquiry, Error>;
}

/// Intake stub that accepts everything without storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactIntake;

#[async_trait]
impl ContactIntake for FixtureContactIntake {
    async fn submit(&self, submission: &ContactSubmission) -> Result<Inquiry, Error> {
        Ok(Inquiry {
            id: InquiryId::new(1),
            name: submission.name().to_owned(),
            email: submission.email().to_owned(),
            subject: submission.subject().to_owned(),
            message: submission.message().to_owned(),
            submitted_at: Utc::now(),
            status: InquiryStatus::New,
        })
    }
}
