//! Driven port for one-way password hashing.
//!
//! Hashing is deliberately slow; adapters should keep it off the async
//! executor threads.

use async_trait::async_trait;

use crate::domain::PasswordDigest;

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Producing a digest failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Check a plaintext password against a stored digest.
    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError>;
}
