//! Knowledge-base search.
//!
//! ```text
//! GET /search?q=oksekød&page=2
//! ```

use actix_web::{HttpRequest, HttpResponse, get, web};
use pagination::PageRequest;
use url::form_urlencoded;

use crate::domain::{SEARCH_PAGE_SIZE, SearchQuery};

use super::context::PageContext;
use super::error::PageResult;
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{self, search};

/// Query string of `GET /search`.
///
/// `page` is kept raw so unparsable values fall back to the first page
/// instead of rejecting the request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: String,
    pub page: Option<String>,
}

impl SearchParams {
    /// Read `q` and `page` from a raw query string.
    ///
    /// Repeated keys keep their first value and unknown keys are ignored, so
    /// no query string is rejected.
    ///
    /// # Examples
    /// ```
    /// use vidensbank::inbound::http::search::SearchParams;
    ///
    /// let params = SearchParams::from_query("q=kaffe&q=te&page=2");
    /// assert_eq!(params.q, "kaffe");
    /// assert_eq!(params.page.as_deref(), Some("2"));
    /// ```
    pub fn from_query(raw: &str) -> Self {
        let mut q = None;
        let mut page = None;
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "q" => &mut q,
                "page" => &mut page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        Self {
            q: q.unwrap_or_default(),
            page,
        }
    }
}

/// Search published pages by title and body.
#[get("/search")]
pub async fn search_pages(
    state: web::Data<HttpState>,
    session: SessionContext,
    req: HttpRequest,
) -> PageResult<HttpResponse> {
    let SearchParams { q, page } = SearchParams::from_query(req.query_string());
    let request = PageRequest::lenient(page.as_deref(), SEARCH_PAGE_SIZE);
    let outcome = state.content.search(SearchQuery::new(q), request).await;

    let context = PageContext::load(&state, &session).await?;
    Ok(views::html_response(search::results(
        &context.chrome(&state),
        &outcome,
    )))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};

    #[rstest]
    #[case("/search?q=oksek%C3%B8d", true)]
    #[case("/search?q=OKSEK%C3%98D&page=abc", true)]
    #[case("/search?q=oksek%C3%B8d&page=2", false)]
    #[case("/search?q=oksek%C3%B8d&page=4294967296", false)]
    #[case("/search?q=oksek%C3%B8d&q=x", true)]
    #[case("/search?q=zzqq&q=oksek%C3%B8d", false)]
    #[case("/search?q=oksek%C3%B8d&page=1&page=2", true)]
    #[case("/search?q=oksek%C3%B8d&page=%FF", true)]
    #[case("/search?q=%20%20", false)]
    #[case("/search", false)]
    #[actix_web::test]
    async fn renders_results_leniently(#[case] uri: &str, #[case] hit: bool) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fixture_state()))
                .wrap(test_session_middleware())
                .service(search_pages),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
        assert_eq!(body.contains("href=\"/pages/oksekodets-klimaaftryk\""), hit, "{uri}");
    }

    #[rstest]
    #[case("", "", None)]
    #[case("q=a&q=b", "a", None)]
    #[case("page=3&page=x&q=kod", "kod", Some("3"))]
    #[case("q=%C3%B8ko+logi&lang=da", "øko logi", None)]
    #[case("q", "", None)]
    #[::core::prelude::v1::test]
    fn query_keeps_first_values(
        #[case] raw: &str,
        #[case] q: &str,
        #[case] page: Option<&str>,
    ) {
        let params = SearchParams::from_query(raw);
        assert_eq!(params.q, q);
        assert_eq!(params.page.as_deref(), page);
    }
}
