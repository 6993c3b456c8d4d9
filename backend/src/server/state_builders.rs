//! Builders wiring outbound adapters into the HTTP state ports.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use crate::domain::ports::{DatabaseHealth, InquiryRepository, PageRepository, UserRepository};
use crate::domain::{AccountService, AdminOverviewService, ContactIntakeService, ContentService};
use crate::inbound::http::state::{HttpState, HttpStatePorts, SiteSettings};
use crate::outbound::memory::{
    InMemoryHealthProbe, InMemoryInquiryRepository, InMemoryPageRepository, InMemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselHealthProbe, DieselInquiryRepository, DieselPageRepository,
    DieselUserRepository,
};
use crate::outbound::security::Argon2PasswordHasher;

use super::ServerConfig;

/// Compose the domain services over one set of repositories.
fn ports_over<U, P, I>(
    users: Arc<U>,
    pages: Arc<P>,
    inquiries: Arc<I>,
    database: Arc<dyn DatabaseHealth>,
) -> HttpStatePorts
where
    U: UserRepository + 'static,
    P: PageRepository + 'static,
    I: InquiryRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        profile: accounts,
        content: Arc::new(ContentService::new(pages.clone())),
        contact: Arc::new(ContactIntakeService::new(
            inquiries.clone(),
            Arc::new(DefaultClock),
        )),
        admin: Arc::new(AdminOverviewService::new(users, pages, inquiries)),
        database,
    }
}

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    ports_over(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselPageRepository::new(pool.clone())),
        Arc::new(DieselInquiryRepository::new(pool.clone())),
        Arc::new(DieselHealthProbe::new(pool.clone())),
    )
}

fn memory_ports() -> std::io::Result<HttpStatePorts> {
    let pages = InMemoryPageRepository::seeded()
        .map_err(|err| std::io::Error::other(format!("seeding in-memory pages failed: {err}")))?;
    Ok(ports_over(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(pages),
        Arc::new(InMemoryInquiryRepository::new()),
        Arc::new(InMemoryHealthProbe),
    ))
}

/// Build handler state: PostgreSQL adapters when a pool is configured,
/// in-process adapters otherwise.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the in-memory seed data is invalid.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL persistence");
            diesel_ports(pool)
        }
        None => {
            warn!("no database pool configured; data will not survive a restart");
            memory_ports()?
        }
    };
    Ok(HttpState::new(
        ports,
        SiteSettings {
            app_name: config.app.app_name.clone(),
        },
    ))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{EmailAddress, LoginCredentials, Registration, SearchQuery, Username};
    use crate::inbound::http::session_config::BuildMode;
    use crate::server::AppConfig;
    use mockable::MockEnv;
    use pagination::PageRequest;
    use rstest::rstest;

    fn debug_config() -> ServerConfig {
        let mut env = MockEnv::new();
        env.expect_string().times(0..).returning(|_| None);
        ServerConfig::new(AppConfig::from_env(&env, BuildMode::Debug).expect("config"))
    }

    #[rstest]
    #[tokio::test]
    async fn memory_state_serves_seeded_pages() {
        let state = build_http_state(&debug_config()).expect("state");

        let outcome = state
            .content
            .search(SearchQuery::new("økologi"), PageRequest::default())
            .await;
        assert!(outcome.results.total() > 0);
        assert!(state.database.ping().await.is_ok());
        assert_eq!(state.site.app_name, "Vidensbank");
    }

    #[rstest]
    #[tokio::test]
    async fn memory_state_shares_one_user_store() {
        let state = build_http_state(&debug_config()).expect("state");
        let registration = Registration::try_from_parts(
            "signe",
            "signe@eksempel.dk",
            "hemmeligt1",
            "hemmeligt1",
        )
        .expect("valid registration");
        let user = state.registration.register(&registration).await.expect("registered");

        let credentials = LoginCredentials::try_from_parts("signe", "hemmeligt1").expect("creds");
        let signed_in = state.login.authenticate(&credentials).await.expect("login");
        assert_eq!(signed_in.id(), user.id());

        let profile = state.profile.fetch_profile(user.id()).await.expect("lookup");
        assert_eq!(
            profile.as_ref().map(|u| u.username()),
            Some(&Username::new("signe").expect("username"))
        );
        assert_eq!(
            profile.as_ref().map(|u| u.email()),
            Some(&EmailAddress::new("signe@eksempel.dk").expect("email"))
        );
    }
}
