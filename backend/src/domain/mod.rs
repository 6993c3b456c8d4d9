//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers, plus the services that implement the driving ports.
//! Types validate on construction and document their invariants in
//! Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: error payload and stable identifiers.
//! - User, Username, EmailAddress, Role: account identity.
//! - LoginCredentials, Registration, AdminCapability: authentication input
//!   and proof of role.
//! - ContentPage, SearchQuery, SearchOutcome: the knowledge base.
//! - ContactSubmission, Inquiry: contact form intake.
//! - calculate_co2 and FoodCategory: the emissions calculator.

mod account_service;
mod admin_overview_service;
pub mod auth;
pub mod contact;
mod contact_service;
pub mod content;
mod content_service;
pub mod emissions;
pub mod error;
pub mod ports;
pub mod slug;
mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::admin_overview_service::AdminOverviewService;
pub use self::auth::{
    AdminCapability, DEFAULT_LOGIN_REDIRECT, LoginCredentials, LoginValidationError,
    PASSWORD_MIN, PasswordDigest, Registration, RegistrationValidationError,
    safe_redirect_target,
};
pub use self::contact::{
    ContactSubmission, ContactValidationError, Inquiry, InquiryId, InquiryStatus,
    UnknownInquiryStatus,
};
pub use self::contact_service::ContactIntakeService;
pub use self::content::{
    ContentPage, PageId, SEARCH_PAGE_SIZE, SEARCH_UNAVAILABLE_NOTICE, SearchOutcome, SearchQuery,
};
pub use self::content_service::ContentService;
pub use self::emissions::{
    EMISSION_UNIT, EmissionError, EmissionEstimate, Equivalents, FoodCategory, calculate_co2,
    verify_factor_table,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::slug::{Slug, SlugError};
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, Role, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use vidensbank::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Du har ikke adgang til denne side"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
