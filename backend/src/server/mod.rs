//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{
    AppConfig, ConfigError, DEFAULT_BIND_ADDR, DEFAULT_MAX_CONTENT_LENGTH, Environment,
    ServerConfig, normalise_database_url,
};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession, TtlExtensionPolicy},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::account::{admin, dashboard};
use crate::inbound::http::api::{api_status, calculate, json_config};
use crate::inbound::http::assets::{calculator_script, stylesheet};
use crate::inbound::http::auth::{login, login_form, logout, register, register_form};
use crate::inbound::http::contact::{contact_form, submit_contact};
use crate::inbound::http::error::{form_config, query_config};
use crate::inbound::http::health::{HealthState, health, live, ready};
use crate::inbound::http::pages;
use crate::inbound::http::search::search_pages;
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::middleware::security_headers::SecurityHeaders;

/// Everything one worker's [`App`] needs.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub session: SessionSettings,
    /// Body limit for forms and JSON, in bytes.
    pub max_content_length: usize,
    /// Send `Strict-Transport-Security`.
    pub hsts: bool,
}

fn session_middleware(settings: SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    let ttl = i64::try_from(settings.lifetime.as_secs()).unwrap_or(i64::MAX);
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(
            PersistentSession::default()
                .session_ttl(CookieDuration::seconds(ttl))
                .session_ttl_extension_policy(TtlExtensionPolicy::OnEveryRequest),
        )
        .build()
}

/// Assemble the application: shared state, middleware and every route.
///
/// Middleware order, outermost first: tracing, security headers, session.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
        max_content_length,
        hsts,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config(max_content_length))
        .app_data(form_config(max_content_length))
        .app_data(query_config())
        .wrap(session_middleware(session))
        .wrap(SecurityHeaders::new(hsts))
        .wrap(Trace)
        .service(health)
        .service(ready)
        .service(live)
        .service(api_status)
        .service(calculate)
        .service(stylesheet)
        .service(calculator_script)
        .configure(pages::configure)
        .service(login_form)
        .service(login)
        .service(logout)
        .service(register_form)
        .service(register)
        .service(dashboard)
        .service(admin)
        .service(search_pages)
        .service(contact_form)
        .service(submit_contact);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::to(pages::not_found))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] carrying the application settings and
///   an optional database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building state, binding the socket or
/// starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig { app, db_pool: _ } = config;
    let AppConfig {
        max_content_length,
        environment,
        bind_addr,
        session,
        ..
    } = app;
    let hsts = environment.uses_hsts();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
            max_content_length,
            hsts,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
