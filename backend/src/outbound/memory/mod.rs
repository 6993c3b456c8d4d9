//! In-process adapters used when no database is configured.
//!
//! Data lives only as long as the process; these back local development
//! and the HTTP test suites.

mod health_probe;
mod inquiry_repository;
mod page_repository;
mod user_repository;

pub use health_probe::InMemoryHealthProbe;
pub use inquiry_repository::InMemoryInquiryRepository;
pub use page_repository::InMemoryPageRepository;
pub use user_repository::InMemoryUserRepository;
