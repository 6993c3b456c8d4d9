//! Administrator overview of users, pages and inquiries.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    AdminOverview, AdminOverviewQuery, InquiryRepository, PageRepository, UserRepository,
};
use crate::domain::{AdminCapability, Error};

/// Read-only overview service for administrators.
#[derive(Clone)]
pub struct AdminOverviewService<U, P, I> {
    users: Arc<U>,
    pages: Arc<P>,
    inquiries: Arc<I>,
}

impl<U, P, I> AdminOverviewService<U, P, I> {
    /// Create a service over the three repositories it lists.
    pub fn new(users: Arc<U>, pages: Arc<P>, inquiries: Arc<I>) -> Self {
        Self {
            users,
            pages,
            inquiries,
        }
    }
}

fn listing_failed(what: &'static str, err: impl std::fmt::Display) -> Error {
    error!(error = %err, "failed to list {what}");
    Error::internal(format!("failed to list {what}: {err}"))
}

#[async_trait]
impl<U, P, I> AdminOverviewQuery for AdminOverviewService<U, P, I>
where
    U: UserRepository,
    P: PageRepository,
    I: InquiryRepository,
{
    async fn overview(&self, capability: &AdminCapability) -> Result<AdminOverview, Error> {
        let users = self
            .users
            .list_all()
            .await
            .map_err(|err| listing_failed("users", err))?;
        let pages = self
            .pages
            .list_all()
            .await
            .map_err(|err| listing_failed("pages", err))?;
        let inquiries = self
            .inquiries
            .list_newest_first()
            .await
            .map_err(|err| listing_failed("inquiries", err))?;

        info!(
            admin = %capability.holder().username(),
            users = users.len(),
            pages = pages.len(),
            inquiries = inquiries.len(),
            "admin overview loaded"
        );
        Ok(AdminOverview {
            users,
            pages,
            inquiries,
        })
    }
}
