//! Informational page handlers.
//!
//! ```text
//! GET /, /index
//! GET /emissioner-og-baeredygtighed[/...], /oekologi, /okologi[/...]
//! GET /calculator
//! GET /pages/{slug}
//! ```

use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::domain::{Error, Slug};

use super::context::PageContext;
use super::error::PageResult;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{self, pages};

const PAGE_NOT_FOUND: &str = "page not found";

/// Landing page.
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> PageResult<HttpResponse> {
    let context = PageContext::load(&state, &session).await?;
    Ok(views::html_response(pages::home(&context.chrome(&state))))
}

/// Entry of the static route table matching the request path.
pub async fn static_page(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let page = pages::STATIC_PAGES
        .iter()
        .find(|page| page.path == req.path())
        .ok_or_else(|| Error::not_found(PAGE_NOT_FOUND))?;
    let context = PageContext::load(&state, &session).await?;
    Ok(views::html_response(pages::static_page(
        &context.chrome(&state),
        page,
    )))
}

/// Calculator form.
#[get("/calculator")]
pub async fn calculator(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let context = PageContext::load(&state, &session).await?;
    Ok(views::html_response(pages::calculator(&context.chrome(&state))))
}

/// A published content page.
///
/// Malformed, unknown and unpublished slugs all answer with the 404 page.
#[get("/pages/{slug}")]
pub async fn content_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    slug: web::Path<String>,
) -> PageResult<HttpResponse> {
    let slug = Slug::new(slug.into_inner()).map_err(|_| Error::not_found(PAGE_NOT_FOUND))?;
    let page = state
        .content
        .find_page(&slug)
        .await?
        .filter(|page| page.is_published)
        .ok_or_else(|| Error::not_found(PAGE_NOT_FOUND))?;
    let context = PageContext::load(&state, &session).await?;
    Ok(views::html_response(pages::content_page(
        &context.chrome(&state),
        &page,
    )))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> PageResult<HttpResponse> {
    Err(Error::not_found(PAGE_NOT_FOUND).into())
}

/// Register the landing page and the static route table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/index", web::get().to(home));
    for page in pages::STATIC_PAGES {
        cfg.route(page.path, web::get().to(static_page));
    }
    cfg.service(calculator).service(content_page);
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};

    macro_rules! pages_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(fixture_state()))
                    .wrap(test_session_middleware())
                    .configure(configure)
                    .default_service(web::to(not_found)),
            )
            .await
        };
    }

    async fn body_of(res: actix_web::dev::ServiceResponse) -> String {
        String::from_utf8_lossy(&test::read_body(res).await).into_owned()
    }

    #[rstest]
    #[case("/", "Viden om mad, klima og økologi")]
    #[case("/index", "Viden om mad, klima og økologi")]
    #[case("/emissioner-og-baeredygtighed/klimadata", "Klimadata")]
    #[case("/oekologi", "Økologi")]
    #[case("/okologi/esg", "Økologi og ESG")]
    #[case("/calculator", "CO2-beregner")]
    #[case("/pages/oksekodets-klimaaftryk", "Oksekødets klimaaftryk")]
    #[actix_web::test]
    async fn renders_known_pages(#[case] uri: &str, #[case] fragment: &str) {
        let app = pages_app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK, "{uri}");
        assert!(body_of(res).await.contains(fragment), "{uri}");
    }

    #[rstest]
    #[case("/pages/findes-ikke")]
    #[case("/pages/Ugyldig%20Slug")]
    #[case("/okologi/ukendt")]
    #[case("/wp-admin")]
    #[actix_web::test]
    async fn unknown_pages_render_the_404_page(#[case] uri: &str) {
        let app = pages_app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(body_of(res).await.contains("Siden blev ikke fundet"));
    }
}
