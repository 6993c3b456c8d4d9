//! Stylesheet and calculator script compiled into the binary.
//!
//! ```text
//! GET /static/css/site.css
//! GET /static/js/calculator.js
//! ```

use actix_web::{HttpResponse, get};

const SITE_CSS: &str = include_str!("../../../static/css/site.css");
const CALCULATOR_JS: &str = include_str!("../../../static/js/calculator.js");

/// Site stylesheet.
#[get("/static/css/site.css")]
pub async fn stylesheet() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(SITE_CSS)
}

/// Calculator form script.
#[get("/static/js/calculator.js")]
pub async fn calculator_script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/javascript; charset=utf-8")
        .body(CALCULATOR_JS)
}
