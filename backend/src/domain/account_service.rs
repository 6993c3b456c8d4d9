//! Account use-cases: login, registration and profile lookup.
//!
//! `AccountService` implements the [`LoginService`], [`RegistrationService`]
//! and [`UserProfileQuery`] driving ports on top of the [`UserRepository`]
//! and [`PasswordHasher`] driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    EMAIL_TAKEN_MESSAGE, INVALID_CREDENTIALS_MESSAGE, LoginService, NewUser, PasswordHashError,
    PasswordHasher, RegistrationService, USERNAME_TAKEN_MESSAGE, UniqueUserField,
    UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, Registration, Role, User, UserId, Username,
};

/// Account service backed by a user repository and a password hasher.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service from its driven ports.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create an account with an explicit role.
    ///
    /// Registration goes through here with [`Role::User`]; the management
    /// binary uses it to create administrators.
    pub async fn create_account(
        &self,
        username: &Username,
        email: &EmailAddress,
        password: &str,
        role: Role,
    ) -> Result<User, Error> {
        // Pre-checks give friendly messages; the unique constraints still
        // decide races between concurrent registrations.
        if self
            .users
            .username_exists(username)
            .await
            .map_err(map_persistence_error)?
        {
            return Err(Error::conflict(USERNAME_TAKEN_MESSAGE));
        }
        if self
            .users
            .email_exists(email)
            .await
            .map_err(map_persistence_error)?
        {
            return Err(Error::conflict(EMAIL_TAKEN_MESSAGE));
        }

        let password = self.hasher.hash(password).await.map_err(map_hash_error)?;
        let new_user = NewUser {
            id: UserId::random(),
            username: username.clone(),
            email: email.clone(),
            role,
            password,
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), username = %user.username(), role = %role, "account created");
        Ok(user)
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable("Databasen er ikke tilgængelig")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(message)
        }
        UserPersistenceError::Conflict {
            field: UniqueUserField::Username,
        } => Error::conflict(USERNAME_TAKEN_MESSAGE),
        UserPersistenceError::Conflict {
            field: UniqueUserField::Email,
        } => Error::conflict(EMAIL_TAKEN_MESSAGE),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    error!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = credentials.username();
        let Some(stored) = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_persistence_error)?
        else {
            warn!(username, "failed login attempt");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &stored.password)
            .await
            .map_err(map_hash_error)?;
        if !verified {
            warn!(username, "failed login attempt");
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }

        info!(username, user_id = %stored.user.id(), "user logged in");
        Ok(stored.user)
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        self.create_account(
            registration.username(),
            registration.email(),
            registration.password(),
            Role::User,
        )
        .await
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
