//! Login, logout and registration handlers.
//!
//! ```text
//! GET  /login[?next=/admin]
//! POST /login     username=anna&password=...&next=/admin
//! GET  /logout
//! GET  /register
//! POST /register  username=...&email=...&password=...&password_confirm=...
//! ```
//!
//! Form posts answer with a `303 See Other` and queue a flash notice for the
//! page the visitor lands on.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{ErrorCode, LoginCredentials, Registration, safe_redirect_target};

use super::context::{PageContext, login_location};
use super::error::PageResult;
use super::session::{FlashLevel, SessionContext};
use super::state::HttpState;
use super::views::{self, forms};

const LOGIN_REQUIRED_FIELDS_MESSAGE: &str = "Brugernavn og adgangskode er påkrævet.";
const LOGIN_FAILED_MESSAGE: &str = "Der opstod en fejl. Prøv igen.";
const REGISTERED_MESSAGE: &str = "Registrering gennemført! Du kan nu logge ind.";
const REGISTRATION_FAILED_MESSAGE: &str = "Der opstod en fejl. Prøv igen senere.";

/// Query string accepted by `GET /login`.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Body of `POST /login`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

/// Body of `POST /register`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Render the login form, or send signed-in visitors home.
#[get("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
) -> PageResult<HttpResponse> {
    let context = PageContext::load(&state, &session).await?;
    if context.is_authenticated() {
        return Ok(views::redirect("/"));
    }
    let next = query.next.as_deref();
    Ok(views::html_response(forms::login(&context.chrome(&state), next)))
}

/// Authenticate and start a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    if PageContext::current_user(&state, &session).await?.is_some() {
        return Ok(views::redirect("/"));
    }
    let LoginForm {
        username,
        password,
        next,
    } = form.into_inner();
    let retry = login_location(next.as_deref());

    let Ok(credentials) = LoginCredentials::try_from_parts(&username, &password) else {
        session.push_flash(FlashLevel::Error, LOGIN_REQUIRED_FIELDS_MESSAGE)?;
        return Ok(views::redirect(&retry));
    };

    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            Ok(views::redirect(safe_redirect_target(next.as_deref())))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            session.push_flash(FlashLevel::Error, err.message())?;
            Ok(views::redirect(&retry))
        }
        Err(_) => {
            session.push_flash(FlashLevel::Error, LOGIN_FAILED_MESSAGE)?;
            Ok(views::redirect(&retry))
        }
    }
}

/// End the session.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> PageResult<HttpResponse> {
    if session.user_id()?.is_none() {
        return Ok(views::redirect(&login_location(Some("/logout"))));
    }
    session.purge();
    Ok(views::redirect("/"))
}

/// Render the registration form, or send signed-in visitors home.
#[get("/register")]
pub async fn register_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let context = PageContext::load(&state, &session).await?;
    if context.is_authenticated() {
        return Ok(views::redirect("/"));
    }
    Ok(views::html_response(forms::register(&context.chrome(&state))))
}

/// Create an account.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> PageResult<HttpResponse> {
    if PageContext::current_user(&state, &session).await?.is_some() {
        return Ok(views::redirect("/"));
    }
    let RegisterForm {
        username,
        email,
        password,
        password_confirm,
    } = form.into_inner();

    let registration =
        match Registration::try_from_parts(&username, &email, &password, &password_confirm) {
            Ok(registration) => registration,
            Err(err) => {
                session.push_flash(FlashLevel::Error, err.user_message())?;
                return Ok(views::redirect("/register"));
            }
        };

    match state.registration.register(&registration).await {
        Ok(_) => {
            session.push_flash(FlashLevel::Success, REGISTERED_MESSAGE)?;
            Ok(views::redirect("/login"))
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            session.push_flash(FlashLevel::Error, err.message())?;
            Ok(views::redirect("/register"))
        }
        Err(_) => {
            session.push_flash(FlashLevel::Error, REGISTRATION_FAILED_MESSAGE)?;
            Ok(views::redirect("/register"))
        }
    }
}
