//! Driving port for the administrator overview.
//!
//! Callers must present an [`AdminCapability`], so the role check happens
//! before the port is reachable at all.

use async_trait::async_trait;

use crate::domain::{AdminCapability, ContentPage, Error, Inquiry, User};

/// Everything the admin page lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminOverview {
    pub users: Vec<User>,
    pub pages: Vec<ContentPage>,
    /// Newest first.
    pub inquiries: Vec<Inquiry>,
}

/// Domain use-case port for the admin overview.
#[async_trait]
pub trait AdminOverviewQuery: Send + Sync {
    /// Load users, pages and inquiries.
    async fn overview(&self, capability: &AdminCapability) -> Result<AdminOverview, Error>;
}

/// Overview listing only the administrator holding the capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminOverviewQuery;

#[async_trait]
impl AdminOverviewQuery for FixtureAdminOverviewQuery {
    async fn overview(&self, capability: &AdminCapability) -> Result<AdminOverview, Error> {
        Ok(AdminOverview {
            users: vec![capability.holder().clone()],
            ..AdminOverview::default()
        })
    }
}
