//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! infrastructure. This makes HTTP handler tests deterministic because they
//! can substitute a test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

use super::fixtures::{fixture_admin, fixture_member};

/// Message shown for any failed login, whether or not the username exists.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Ugyldigt brugernavn eller adgangskode";

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown usernames and wrong passwords both yield the same
    /// [`crate::domain::ErrorCode::Unauthorized`] error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// In-memory authenticator for handler tests.
///
/// `admin` / `password` signs in the fixture administrator and
/// `anna` / `password` the fixture member.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        match (credentials.username(), credentials.password()) {
            ("admin", "password") => fixture_admin(),
            ("anna", "password") => fixture_member(),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)),
        }
    }
}
