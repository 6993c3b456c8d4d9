//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminOverviewQuery, ContactIntake, ContentQuery, DatabaseHealth, LoginService,
    RegistrationService, UserProfileQuery,
};

/// Display name used when `APP_NAME` is unset.
pub const DEFAULT_APP_NAME: &str = "Vidensbank";

/// Site-wide presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    /// Name shown in the page chrome and titles.
    pub app_name: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_owned(),
        }
    }
}

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub content: Arc<dyn ContentQuery>,
    pub contact: Arc<dyn ContactIntake>,
    pub admin: Arc<dyn AdminOverviewQuery>,
    pub database: Arc<dyn DatabaseHealth>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub content: Arc<dyn ContentQuery>,
    pub contact: Arc<dyn ContactIntake>,
    pub admin: Arc<dyn AdminOverviewQuery>,
    pub database: Arc<dyn DatabaseHealth>,
    pub site: SiteSettings,
}

impl HttpState {
    /// Construct state from the port bundle and site settings.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use vidensbank::domain::ports::{
    ///     FixtureAdminOverviewQuery, FixtureContactIntake, FixtureContentQuery,
    ///     FixtureDatabaseHealth, FixtureLoginService, FixtureRegistrationService,
    ///     FixtureUserProfileQuery,
    /// };
    /// use vidensbank::inbound::http::state::{HttpState, HttpStatePorts, SiteSettings};
    ///
    /// let state = HttpState::new(
    ///     HttpStatePorts {
    ///         login: Arc::new(FixtureLoginService),
    ///         registration: Arc::new(FixtureRegistrationService),
    ///         profile: Arc::new(FixtureUserProfileQuery),
    ///         content: Arc::new(FixtureContentQuery),
    ///         contact: Arc::new(FixtureContactIntake),
    ///         admin: Arc::new(FixtureAdminOverviewQuery),
    ///         database: Arc::new(FixtureDatabaseHealth),
    ///     },
    ///     SiteSettings::default(),
    /// );
    /// assert_eq!(state.site.app_name, "Vidensbank");
    /// ```
    pub fn new(ports: HttpStatePorts, site: SiteSettings) -> Self {
        let HttpStatePorts {
            login,
            registration,
            profile,
            content,
            contact,
            admin,
            database,
        } = ports;
        Self {
            login,
            registration,
            profile,
            content,
            contact,
            admin,
            database,
            site,
        }
    }
}
