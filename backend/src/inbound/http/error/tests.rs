//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::payload_too_large("big"), StatusCode::PAYLOAD_TOO_LARGE)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
    assert_eq!(PageError::from(err).status_code(), status);
}

async fn json_error_response(error: Error, expected_status: StatusCode) -> (Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("connection refused on 10.0.0.4")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (header, payload) = json_error_response(error, StatusCode::INTERNAL_SERVER_ERROR).await;

    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), INTERNAL_ERROR_MESSAGE);
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_their_details(expected_trace_id: String) {
    let error = Error::invalid_request("food_type is required")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "food_type"}));

    let (header, payload) = json_error_response(error, StatusCode::BAD_REQUEST).await;

    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.message(), "food_type is required");
    assert_eq!(payload.details(), Some(&json!({"field": "food_type"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let (header, payload) =
        json_error_response(Error::not_found("missing"), StatusCode::NOT_FOUND).await;

    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[case(StatusCode::NOT_FOUND, Error::not_found("/mangler"), "Siden blev ikke fundet")]
#[case(StatusCode::FORBIDDEN, Error::forbidden("nej"), "Adgang nægtet")]
#[case(
    StatusCode::PAYLOAD_TOO_LARGE,
    Error::payload_too_large("for stor"),
    "Maksimal størrelse er 16MB"
)]
#[case(StatusCode::INTERNAL_SERVER_ERROR, Error::internal("db exploded"), "Der opstod en fejl")]
#[actix_web::test]
async fn page_errors_render_html(
    #[case] status: StatusCode,
    #[case] error: Error,
    #[case] fragment: &str,
) {
    let response = PageError::from(error).error_response();
    assert_eq!(response.status(), status);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body()).await.expect("body");
    let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
    assert!(body.contains(fragment), "missing {fragment:?} in {body}");
    assert!(!body.contains("db exploded"));
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
    assert_eq!(err.details(), None);
}

#[rstest]
#[actix_web::test]
async fn oversized_form_renders_413_page() {
    use actix_web::{App, test, web};

    #[derive(serde::Deserialize)]
    struct Note {
        #[expect(dead_code, reason = "only the size of the body matters")]
        text: String,
    }

    let app = test::init_service(App::new().app_data(form_config(64)).route(
        "/note",
        web::post().to(|_note: web::Form<Note>| async { actix_web::HttpResponse::Ok() }),
    ))
    .await;
    let req = test::TestRequest::post()
        .uri("/note")
        .set_form([("text", "x".repeat(512))])
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = test::read_body(res).await;
    assert!(String::from_utf8_lossy(&body).contains("Maksimal størrelse er 16MB"));
}

#[rstest]
#[actix_web::test]
async fn undecodable_query_renders_400_page() {
    use actix_web::{App, test, web};

    #[derive(serde::Deserialize)]
    struct Next {
        #[expect(dead_code, reason = "only decoding matters")]
        next: Option<String>,
    }

    let app = test::init_service(App::new().app_data(query_config()).route(
        "/login",
        web::get().to(|_query: web::Query<Next>| async { actix_web::HttpResponse::Ok() }),
    ))
    .await;
    let req = test::TestRequest::get()
        .uri("/login?next=%2Fa&next=%2Fb")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    assert!(body.contains("Ugyldig forespørgsel"));
    assert!(!body.contains("duplicate field"));
}
