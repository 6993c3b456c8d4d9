//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting handlers
//! turn failures into consistent responses: JSON for `/api` endpoints and
//! rendered HTML error pages for browser routes.

use std::fmt;

use actix_web::error::{QueryPayloadError, UrlencodedError};
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::views;

/// Convenient result alias for JSON handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Result alias for handlers rendering HTML pages.
pub type PageResult<T> = Result<T, PageError>;

/// Message shown in place of any internal failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(INTERNAL_ERROR_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_ERROR_MESSAGE)
    }
}

/// Domain error rendered as an HTML error page.
///
/// Not-found and forbidden outcomes are logged at `warn`, server-side
/// failures at `error`. The page never shows the underlying message.
///
/// # Examples
/// ```
/// use actix_web::{ResponseError, http::StatusCode};
/// use vidensbank::domain::Error;
/// use vidensbank::inbound::http::error::PageError;
///
/// let err = PageError::from(Error::not_found("side mangler"));
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PageError(Error);

impl PageError {
    /// The wrapped domain error.
    pub fn inner(&self) -> &Error {
        &self.0
    }
}

impl From<Error> for PageError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        status_for(self.0.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = self.0.trace_id();
        if status.is_server_error() {
            error!(code = ?self.0.code(), message = self.0.message(), trace_id, "page failed");
        } else {
            warn!(code = ?self.0.code(), message = self.0.message(), trace_id, "page refused");
        }

        let mut builder = HttpResponse::build(status);
        builder.content_type(ContentType::html());
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.body(views::errors::error_page(status).into_string())
    }
}

/// Form extractor settings for browser routes.
///
/// Bodies over `limit` bytes render the 413 page; other decoding failures
/// render the 400 page.
pub fn form_config(limit: usize) -> web::FormConfig {
    web::FormConfig::default()
        .limit(limit)
        .error_handler(|err: UrlencodedError, req: &HttpRequest| {
            let error = match err {
                UrlencodedError::Overflow { size, limit } => {
                    Error::payload_too_large(format!("form body of {size} bytes exceeds {limit}"))
                }
                other => Error::invalid_request(format!("unreadable form on {}: {other}", req.path())),
            };
            PageError::from(error).into()
        })
}

/// Query-string extractor settings for browser routes.
///
/// Undecodable query strings render the 400 page; the deserializer's message
/// is only logged.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, req: &HttpRequest| {
        PageError::from(Error::invalid_request(format!(
            "unreadable query on {}: {err}",
            req.path()
        )))
        .into()
    })
}

#[cfg(test)]
mod tests;
