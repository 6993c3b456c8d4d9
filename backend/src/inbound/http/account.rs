//! Signed-in pages.
//!
//! ```text
//! GET /dashboard
//! GET /admin
//! ```

use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::domain::AdminCapability;

use super::context::{PageContext, login_location};
use super::error::PageResult;
use super::session::{FlashLevel, SessionContext};
use super::state::HttpState;
use super::views::{self, Chrome, account};

const ADMIN_ONLY_MESSAGE: &str = "Du har ikke adgang til denne side";

/// Member dashboard; anonymous visitors are sent to the login form.
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let context = PageContext::load(&state, &session).await?;
    let Some(user) = context.user.as_ref() else {
        return Ok(views::redirect(&login_location(Some("/dashboard"))));
    };
    Ok(views::html_response(account::dashboard(&context.chrome(&state), user)))
}

/// Admin overview of users, pages and inquiries.
#[get("/admin")]
pub async fn admin(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let Some(user) = PageContext::current_user(&state, &session).await? else {
        return Ok(views::redirect(&login_location(Some("/admin"))));
    };
    let Some(capability) = AdminCapability::for_user(user) else {
        warn!("non-admin requested the admin overview");
        session.push_flash(FlashLevel::Error, ADMIN_ONLY_MESSAGE)?;
        return Ok(views::redirect("/"));
    };

    let overview = state.admin.overview(&capability).await?;
    let flashes = session.take_flashes()?;
    let chrome = Chrome {
        app_name: &state.site.app_name,
        user: Some(capability.holder()),
        flashes: &flashes,
    };
    Ok(views::html_response(account::admin(&chrome, &overview)))
}
