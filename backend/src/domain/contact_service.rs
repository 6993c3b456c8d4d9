//! Contact form intake.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{ContactIntake, InquiryPersistenceError, InquiryRepository};
use crate::domain::{ContactSubmission, Error, Inquiry};

/// Stores contact submissions as inquiries with status `new`.
#[derive(Clone)]
pub struct ContactIntakeService<R> {
    inquiries: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ContactIntakeService<R> {
    /// Create a service over an inquiry repository.
    pub fn new(inquiries: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { inquiries, clock }
    }
}

#[async_trait]
impl<R> ContactIntake for ContactIntakeService<R>
where
    R: InquiryRepository,
{
    async fn submit(&self, submission: &ContactSubmission) -> Result<Inquiry, Error> {
        let submitted_at = self.clock.utc();
        match self.inquiries.insert(submission, submitted_at).await {
            Ok(inquiry) => {
                info!(
                    inquiry_id = inquiry.id.get(),
                    email = submission.email(),
                    "contact form submitted"
                );
                Ok(inquiry)
            }
            Err(err) => {
                error!(error = %err, "contact form submission failed");
                Err(match err {
                    InquiryPersistenceError::Connection { message } => {
                        Error::service_unavailable(message)
                    }
                    InquiryPersistenceError::Query { message } => Error::internal(message),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockInquiryRepository;
    use crate::domain::{ErrorCode, InquiryId, InquiryStatus};
    use chrono::{DateTime, Local, TimeZone, Utc};

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn submission() -> ContactSubmission {
        ContactSubmission::try_from_parts("Ole", "ole@firma.dk", "Tilbud", "Hej med jer")
            .expect("valid submission")
    }

    fn service(repo: MockInquiryRepository) -> ContactIntakeService<MockInquiryRepository> {
        ContactIntakeService::new(Arc::new(repo), Arc::new(FixtureClock(now())))
    }

    #[tokio::test]
    async fn submit_stamps_clock_time() {
        let mut repo = MockInquiryRepository::new();
        repo.expect_insert()
            .withf(|sub, at| sub.name() == "Ole" && *at == now())
            .times(1)
            .return_once(|sub, at| {
                Ok(Inquiry {
                    id: InquiryId::new(4),
                    name: sub.name().to_owned(),
                    email: sub.email().to_owned(),
                    subject: sub.subject().to_owned(),
                    message: sub.message().to_owned(),
                    submitted_at: at,
                    status: InquiryStatus::New,
                })
            });

        let inquiry = service(repo).submit(&submission()).await.expect("stored");

        assert_eq!(inquiry.id, InquiryId::new(4));
        assert_eq!(inquiry.submitted_at, now());
        assert_eq!(inquiry.status, InquiryStatus::New);
    }

    #[tokio::test]
    async fn submit_failure_is_reported() {
        let mut repo = MockInquiryRepository::new();
        repo.expect_insert()
            .return_once(|_, _| Err(InquiryPersistenceError::query("constraint violated")));

        let err = service(repo).submit(&submission()).await.expect_err("fails");

        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
