//! In-process `UserRepository`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    NewUser, StoredUser, UniqueUserField, UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, User, UserId, Username};

/// Accounts held in a mutex-guarded vector, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<StoredUser>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StoredUser>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut users = self.lock()?;
        // Same checks as the unique constraints, under one lock.
        if users.iter().any(|s| s.user.username() == &user.username) {
            return Err(UserPersistenceError::conflict(UniqueUserField::Username));
        }
        if users.iter().any(|s| s.user.email() == &user.email) {
            return Err(UserPersistenceError::conflict(UniqueUserField::Email));
        }
        let stored = User::new(
            user.id,
            user.username.clone(),
            user.email.clone(),
            user.role,
            Utc::now(),
        );
        users.push(StoredUser {
            user: stored.clone(),
            password: user.password.clone(),
        });
        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|s| s.user.id() == id)
            .map(|s| s.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|s| s.user.username().as_ref() == username)
            .cloned())
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.iter().any(|s| s.user.username() == username))
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.iter().any(|s| s.user.email() == email))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.iter().map(|s| s.user.clone()).collect())
    }
}
