//! Application configuration read from the environment, plus the server
//! configuration object handed to [`super::create_server`].

use std::net::SocketAddr;

use mockable::Env;
use tracing::warn;

use crate::inbound::http::session_config::parsing::debug_warn_or_error;
use crate::inbound::http::session_config::{
    BuildMode, SessionConfigError, SessionSettings, session_settings_from_env,
};
use crate::inbound::http::state::DEFAULT_APP_NAME;
use crate::outbound::persistence::DbPool;

const APP_NAME_ENV: &str = "APP_NAME";
const MAX_CONTENT_LENGTH_ENV: &str = "MAX_CONTENT_LENGTH";
const APP_ENV_ENV: &str = "APP_ENV";
const BIND_ADDR_ENV: &str = "BIND_ADDR";
const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Request body limit used when `MAX_CONTENT_LENGTH` is unset (16 MiB).
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;
/// Listen address used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while reading application configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Session settings were rejected.
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Release builds refuse to run on the in-memory adapters.
    #[error("missing required environment variable: DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Deployment flavour selected by `APP_ENV`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Environment {
    /// Local development and tests.
    #[default]
    Development,
    /// Served over HTTPS; enables HSTS.
    Production,
}

impl Environment {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Whether responses carry `Strict-Transport-Security`.
    pub fn uses_hsts(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Settings read once at start-up.
#[derive(Clone)]
pub struct AppConfig {
    /// Display name in the page chrome.
    pub app_name: String,
    /// Request body limit in bytes for forms and JSON.
    pub max_content_length: usize,
    /// Deployment flavour.
    pub environment: Environment,
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Normalised PostgreSQL URL; `None` selects the in-memory adapters.
    pub database_url: Option<String>,
    /// Cookie session settings.
    pub session: SessionSettings,
}

impl AppConfig {
    /// Read configuration from `env`.
    ///
    /// Debug builds fall back to defaults with a warning where release
    /// builds fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mockable::MockEnv;
    /// use vidensbank::inbound::http::session_config::BuildMode;
    /// use vidensbank::server::AppConfig;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "SECRET_KEY" => Some("k".repeat(48)),
    ///     "DATABASE_URL" => Some("postgres://vidensbank@db/vidensbank".to_owned()),
    ///     "APP_ENV" => Some("production".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = AppConfig::from_env(&env, BuildMode::Release).expect("valid config");
    /// assert_eq!(
    ///     config.database_url.as_deref(),
    ///     Some("postgresql://vidensbank@db/vidensbank")
    /// );
    /// assert!(config.environment.uses_hsts());
    /// assert_eq!(config.max_content_length, 16 * 1024 * 1024);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a release build meets a missing or
    /// invalid setting.
    pub fn from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let session = session_settings_from_env(env, mode)?;
        let app_name = env
            .string(APP_NAME_ENV)
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_owned());
        let environment = env
            .string(APP_ENV_ENV)
            .map(|raw| Environment::parse(&raw))
            .unwrap_or_default();
        let database_url = match env.string(DATABASE_URL_ENV) {
            Some(url) if !url.trim().is_empty() => Some(normalise_database_url(url.trim())),
            _ => debug_warn_or_error(mode, None, ConfigError::MissingDatabaseUrl, || {
                warn!("DATABASE_URL not set; using in-memory storage (dev only)");
            })?,
        };

        Ok(Self {
            app_name,
            max_content_length: max_content_length_from_env(env, mode)?,
            environment,
            bind_addr: bind_addr_from_env(env, mode)?,
            database_url,
            session,
        })
    }
}

/// Rewrite the legacy `postgres://` scheme to `postgresql://`.
///
/// # Examples
///
/// ```rust
/// use vidensbank::server::normalise_database_url;
///
/// assert_eq!(normalise_database_url("postgres://db/app"), "postgresql://db/app");
/// assert_eq!(normalise_database_url("postgresql://db/app"), "postgresql://db/app");
/// ```
#[must_use]
pub fn normalise_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{rest}"),
        None => url.to_owned(),
    }
}

fn max_content_length_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<usize, ConfigError> {
    let Some(value) = env.string(MAX_CONTENT_LENGTH_ENV) else {
        return Ok(DEFAULT_MAX_CONTENT_LENGTH);
    };
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => debug_warn_or_error(
            mode,
            DEFAULT_MAX_CONTENT_LENGTH,
            ConfigError::InvalidEnv {
                name: MAX_CONTENT_LENGTH_ENV,
                value: value.clone(),
                expected: "a positive number of bytes",
            },
            || warn!(value = %value, "invalid MAX_CONTENT_LENGTH; using 16 MiB"),
        ),
    }
}

fn bind_addr_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SocketAddr, ConfigError> {
    let fallback = || {
        DEFAULT_BIND_ADDR
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value: DEFAULT_BIND_ADDR.to_owned(),
                expected: "host:port",
            })
    };
    let Some(value) = env.string(BIND_ADDR_ENV) else {
        return fallback();
    };
    match value.trim().parse::<SocketAddr>() {
        Ok(addr) => Ok(addr),
        Err(_) => debug_warn_or_error(
            mode,
            fallback()?,
            ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value: value.clone(),
                expected: "host:port",
            },
            || warn!(value = %value, "invalid BIND_ADDR; using {DEFAULT_BIND_ADDR}"),
        ),
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) app: AppConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Server configuration without a database.
    #[must_use]
    pub fn new(app: AppConfig) -> Self {
        Self { app, db_pool: None }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the server runs on the in-memory adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.app.bind_addr
    }
}
