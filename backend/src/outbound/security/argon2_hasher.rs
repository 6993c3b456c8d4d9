//! Argon2id password hashing adapter.
//!
//! Hashing and verification are CPU-bound, so both run on the blocking pool.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use async_trait::async_trait;
use tracing::Instrument as _;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordDigest, TraceId};

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher.
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<PasswordDigest, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?;
    Ok(PasswordDigest::new(hash.to_string()))
}

fn verify_blocking(password: &str, digest: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

async fn run_blocking<T, F>(task: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
    T: Send + 'static,
{
    let span = match TraceId::current() {
        Some(trace_id) => tracing::debug_span!("password_hash", %trace_id),
        None => tracing::debug_span!("password_hash"),
    };
    tokio::task::spawn_blocking(move || span.in_scope(task))
        .in_current_span()
        .await
        .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || hash_blocking(&password)).await
    }

    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let digest = digest.as_str().to_owned();
        run_blocking(move || verify_blocking(&password, &digest)).await
    }
}
