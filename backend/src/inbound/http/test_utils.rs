//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    FixtureAdminOverviewQuery, FixtureContactIntake, FixtureContentQuery, FixtureDatabaseHealth,
    FixtureLoginService, FixtureRegistrationService, FixtureUserProfileQuery,
};

use super::state::{HttpState, HttpStatePorts, SiteSettings};

/// Session middleware with a fresh key, cookie name `session` and the
/// `Secure` flag off for plain HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports backed by the fixture implementations.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        registration: Arc::new(FixtureRegistrationService),
        profile: Arc::new(FixtureUserProfileQuery),
        content: Arc::new(FixtureContentQuery),
        contact: Arc::new(FixtureContactIntake),
        admin: Arc::new(FixtureAdminOverviewQuery),
        database: Arc::new(FixtureDatabaseHealth),
    }
}

/// Handler state wired to fixtures.
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports(), SiteSettings::default())
}

/// The `session` cookie set by a response.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
