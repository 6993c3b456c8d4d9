//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `ContentQuery`, ...) are called by inbound
//! adapters. Driven ports (`UserRepository`, `PasswordHasher`, ...) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_overview_query;
mod contact_intake;
mod content_query;
mod database_health;
pub mod fixtures;
mod inquiry_repository;
mod login_service;
mod page_repository;
mod password_hasher;
mod registration_service;
mod user_profile_query;
mod user_repository;

pub use admin_overview_query::{AdminOverview, AdminOverviewQuery, FixtureAdminOverviewQuery};
pub use contact_intake::{
    CONTACT_FAILED_MESSAGE, CONTACT_THANKS_MESSAGE, ContactIntake, FixtureContactIntake,
};
#[cfg(test)]
pub use contact_intake::MockContactIntake;
pub use content_query::{ContentQuery, FixtureContentQuery};
pub use database_health::{DatabaseHealth, DatabaseHealthError, FixtureDatabaseHealth};
#[cfg(test)]
pub use inquiry_repository::MockInquiryRepository;
pub use inquiry_repository::{InquiryPersistenceError, InquiryRepository};
pub use login_service::{FixtureLoginService, INVALID_CREDENTIALS_MESSAGE, LoginService};
#[cfg(test)]
pub use page_repository::MockPageRepository;
pub use page_repository::{PagePersistenceError, PageRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use registration_service::{
    EMAIL_TAKEN_MESSAGE, FixtureRegistrationService, RegistrationService, USERNAME_TAKEN_MESSAGE,
};
pub use user_profile_query::{FixtureUserProfileQuery, UserProfileQuery};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    NewUser, StoredUser, UniqueUserField, UserPersistenceError, UserRepository,
};
