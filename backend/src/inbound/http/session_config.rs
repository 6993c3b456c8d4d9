//! Session configuration parsing and validation.
//!
//! Centralises the environment-driven cookie session settings so they are
//! validated consistently and can be tested in isolation with `MockEnv`.

pub(crate) mod parsing;

use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use parsing::{debug_warn_or_error, parse_bool};

pub(crate) const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SESSION_LIFETIME_ENV: &str = "SESSION_LIFETIME";

/// Minimum secret length accepted by cookie key derivation.
pub const SECRET_KEY_MIN_LEN: usize = 32;
/// Inactivity timeout used when `SESSION_LIFETIME` is unset.
pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::from_secs(3600);

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SECONDS_EXPECTED: &str = "a positive number of seconds";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing values.
    Debug,
    /// Release builds require explicit, valid settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vidensbank::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub(crate) fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Cookie session settings derived from the environment.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for the session cookie.
    pub same_site: SameSite,
    /// Inactivity timeout; refreshed on every request.
    pub lifetime: Duration,
}

impl SessionSettings {
    /// Settings with a random key, for tests and local tooling.
    pub fn ephemeral() -> Self {
        Self {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
            lifetime: DEFAULT_SESSION_LIFETIME,
        }
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The secret is too short to derive a cookie key from.
    #[error("SECRET_KEY too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort { length: usize, min_len: usize },
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use vidensbank::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SECRET_KEY" => Some("k".repeat(48)),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_LIFETIME" => Some("600".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.lifetime.as_secs(), 600);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    Ok(SessionSettings {
        key: session_key_from_env(env, mode)?,
        cookie_secure: cookie_secure_from_env(env, mode)?,
        same_site: SameSite::Lax,
        lifetime: lifetime_from_env(env, mode)?,
    })
}

fn session_key_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let Some(secret) = env.string(SECRET_KEY_ENV).map(Zeroizing::new) else {
        return debug_warn_or_error(
            mode,
            Key::generate(),
            SessionConfigError::MissingEnv {
                name: SECRET_KEY_ENV,
            },
            || warn!("SECRET_KEY not set; using temporary session key (dev only)"),
        );
    };

    let length = secret.len();
    if length < SECRET_KEY_MIN_LEN {
        return debug_warn_or_error(
            mode,
            Key::generate(),
            SessionConfigError::KeyTooShort {
                length,
                min_len: SECRET_KEY_MIN_LEN,
            },
            || warn!(length, "SECRET_KEY too short; using temporary session key (dev only)"),
        );
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(COOKIE_SECURE_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => debug_warn_or_error(
            mode,
            false,
            SessionConfigError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_COOKIE_SECURE; defaulting to insecure"),
        ),
    }
}

fn lifetime_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, SessionConfigError> {
    let Some(value) = env.string(SESSION_LIFETIME_ENV) else {
        return Ok(DEFAULT_SESSION_LIFETIME);
    };
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Duration::from_secs(seconds)),
        _ => debug_warn_or_error(
            mode,
            DEFAULT_SESSION_LIFETIME,
            SessionConfigError::InvalidEnv {
                name: SESSION_LIFETIME_ENV,
                value: value.clone(),
                expected: SECONDS_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_LIFETIME; using default"),
        ),
    }
}
