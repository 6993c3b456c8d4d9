//! Driving port for account registration.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, Registration, Role, User, UserId};

/// Message shown when the username is taken.
pub const USERNAME_TAKEN_MESSAGE: &str = "Brugernavn eksisterer allerede";
/// Message shown when the email is taken.
pub const EMAIL_TAKEN_MESSAGE: &str = "Email er allerede registreret";

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account with role `user`.
    ///
    /// A taken username or email yields [`crate::domain::ErrorCode::Conflict`]
    /// with [`USERNAME_TAKEN_MESSAGE`] or [`EMAIL_TAKEN_MESSAGE`].
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}

/// Registration stub for handler tests; `admin` is treated as taken.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationService;

#[async_trait]
impl RegistrationService for FixtureRegistrationService {
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        if registration.username().as_ref() == "admin" {
            return Err(Error::conflict(USERNAME_TAKEN_MESSAGE));
        }
        Ok(User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            Role::User,
            Utc::now(),
        ))
    }
}
