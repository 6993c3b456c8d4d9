//! Shared helpers for the integration suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module assembles the full application over the in-memory adapters and
//! carries the session cookie between requests.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test::{self, TestRequest};
use actix_web::web;
use mockable::DefaultClock;

use vidensbank::domain::{
    AccountService, AdminOverviewService, ContactIntakeService, ContentService, EmailAddress,
    Role, User, Username,
};
use vidensbank::inbound::http::health::HealthState;
use vidensbank::inbound::http::session_config::SessionSettings;
use vidensbank::inbound::http::state::{HttpState, HttpStatePorts, SiteSettings};
use vidensbank::outbound::memory::{
    InMemoryHealthProbe, InMemoryInquiryRepository, InMemoryPageRepository, InMemoryUserRepository,
};
use vidensbank::outbound::security::Argon2PasswordHasher;
use vidensbank::server::{AppDependencies, DEFAULT_MAX_CONTENT_LENGTH};

pub const ADMIN_USERNAME: &str = "redaktion";
pub const ADMIN_PASSWORD: &str = "kompost-2024";

/// A site over fresh in-memory stores.
pub struct MemorySite {
    pub deps: AppDependencies,
    pub users: Arc<InMemoryUserRepository>,
}

impl MemorySite {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_CONTENT_LENGTH)
    }

    pub fn with_limit(max_content_length: usize) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let pages = Arc::new(InMemoryPageRepository::seeded().expect("seed pages"));
        let inquiries = Arc::new(InMemoryInquiryRepository::new());
        let accounts = Arc::new(accounts(&users));

        let ports = HttpStatePorts {
            login: accounts.clone(),
            registration: accounts.clone(),
            profile: accounts,
            content: Arc::new(ContentService::new(pages.clone())),
            contact: Arc::new(ContactIntakeService::new(
                inquiries.clone(),
                Arc::new(DefaultClock),
            )),
            admin: Arc::new(AdminOverviewService::new(users.clone(), pages, inquiries)),
            database: Arc::new(InMemoryHealthProbe),
        };
        let deps = AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::new(ports, SiteSettings::default())),
            session: SessionSettings::ephemeral(),
            max_content_length,
            hsts: false,
        };
        Self { deps, users }
    }

    /// Create the editor account with the admin role.
    pub async fn create_admin(&self) -> User {
        accounts(&self.users)
            .create_account(
                &Username::new(ADMIN_USERNAME).expect("username"),
                &EmailAddress::new("redaktion@vidensbank.dk").expect("email"),
                ADMIN_PASSWORD,
                Role::Admin,
            )
            .await
            .expect("admin created")
    }
}

fn accounts(
    users: &Arc<InMemoryUserRepository>,
) -> AccountService<InMemoryUserRepository, Argon2PasswordHasher> {
    AccountService::new(users.clone(), Arc::new(Argon2PasswordHasher::new()))
}

/// Holds the latest `session` cookie the way a browser would.
#[derive(Default)]
pub struct CookieJar {
    session: Option<Cookie<'static>>,
}

impl CookieJar {
    /// Keep the cookie a response sets; an emptied cookie clears the jar.
    pub fn absorb(&mut self, res: &ServiceResponse) {
        if let Some(cookie) = res.response().cookies().find(|c| c.name() == "session") {
            self.session = (!cookie.value().is_empty()).then(|| cookie.into_owned());
        }
    }

    /// Attach the stored cookie to `req`.
    pub fn attach(&self, req: TestRequest) -> TestRequest {
        match &self.session {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }
}

pub fn location(res: &ServiceResponse) -> Option<String> {
    res.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

pub fn header_value(res: &ServiceResponse, name: &str) -> Option<String> {
    res.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

pub async fn body_text(res: ServiceResponse) -> String {
    String::from_utf8_lossy(&test::read_body(res).await).into_owned()
}
