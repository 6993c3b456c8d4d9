//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, PasswordDigest, Role, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column already holds the submitted value.
        Conflict { field: UniqueUserField } => "user {field} already exists",
    }
}

/// Unique columns on the users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueUserField {
    Username,
    Email,
}

impl std::fmt::Display for UniqueUserField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Username => "username",
            Self::Email => "email",
        })
    }
}

/// Account ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub role: Role,
    pub password: PasswordDigest,
}

/// Account together with its stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub user: User,
    pub password: PasswordDigest,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Returns [`UserPersistenceError::Conflict`] when the username or email
    /// is already taken, even if a concurrent insert won the race.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and credential by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError>;

    /// Whether the username is taken.
    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError>;

    /// Whether the email is taken.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Every account, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
