//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: remembering the signed-in user and queueing
//! one-time flash notices for the next rendered page.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Severity of a flash notice, used as its CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// The action succeeded.
    Success,
    /// The action failed or was refused.
    Error,
    /// Neutral information.
    Info,
}

impl FlashLevel {
    /// CSS class suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A one-time notice shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// The session key is renewed first so a pre-login cookie cannot be
    /// reused after authentication.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every value, including queued notices, and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Queue a notice for the next rendered page.
    pub fn push_flash(&self, level: FlashLevel, message: impl Into<String>) -> Result<(), Error> {
        let mut flashes = self.read_flashes()?;
        flashes.push(Flash {
            level,
            message: message.into(),
        });
        self.0
            .insert(FLASHES_KEY, flashes)
            .map_err(|error| Error::internal(format!("failed to store flash: {error}")))
    }

    /// Remove and return the queued notices.
    pub fn take_flashes(&self) -> Result<Vec<Flash>, Error> {
        let flashes = self.read_flashes()?;
        if !flashes.is_empty() {
            self.0.remove(FLASHES_KEY);
        }
        Ok(flashes)
    }

    fn read_flashes(&self) -> Result<Vec<Flash>, Error> {
        self.0
            .get::<Vec<Flash>>(FLASHES_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|error| Error::internal(format!("failed to read flashes: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
