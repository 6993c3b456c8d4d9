//! Server-rendered HTML built with `maud`.
//!
//! Every page goes through [`layout`], which draws the navigation, the
//! queued flash notices and the footer around the page body.

pub mod account;
pub mod errors;
pub mod forms;
pub mod pages;
pub mod search;

use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};
use chrono::{Datelike, Utc};
use maud::{DOCTYPE, Markup, html};

use crate::domain::User;

use super::session::Flash;
use super::state::DEFAULT_APP_NAME;

/// Per-request values every page needs.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub app_name: &'a str,
    pub user: Option<&'a User>,
    pub flashes: &'a [Flash],
}

impl Chrome<'static> {
    /// Chrome for responses rendered without request context.
    pub fn bare() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME,
            user: None,
            flashes: &[],
        }
    }
}

fn navigation(chrome: &Chrome<'_>) -> Markup {
    html! {
        nav.site-nav {
            a.brand href="/" { (chrome.app_name) }
            ul {
                li { a href="/emissioner-og-baeredygtighed" { "Emissioner" } }
                li { a href="/okologi" { "Økologi" } }
                li { a href="/calculator" { "CO2-beregner" } }
                li { a href="/contact" { "Kontakt" } }
                @match chrome.user {
                    Some(user) => {
                        li { a href="/dashboard" { (user.username().as_ref()) } }
                        @if user.is_admin() {
                            li { a href="/admin" { "Admin" } }
                        }
                        li { a href="/logout" { "Log ud" } }
                    }
                    None => {
                        li { a href="/login" { "Log ind" } }
                        li { a href="/register" { "Opret bruger" } }
                    }
                }
            }
            form.search-box action="/search" method="get" role="search" {
                input type="search" name="q" placeholder="Søg i vidensbanken" aria-label="Søg";
                button type="submit" { "Søg" }
            }
        }
    }
}

fn flashes(items: &[Flash]) -> Markup {
    html! {
        @if !items.is_empty() {
            div.flashes {
                @for flash in items {
                    div class={ "flash flash-" (flash.level.as_str()) } role="alert" {
                        (flash.message)
                    }
                }
            }
        }
    }
}

/// Wrap `body` in the site chrome.
///
/// # Examples
/// ```
/// use maud::html;
/// use vidensbank::inbound::http::views::{Chrome, layout};
///
/// let page = layout(&Chrome::bare(), "Forside", html! { p { "Hej" } }).into_string();
/// assert!(page.contains("<title>Forside | Vidensbank</title>"));
/// ```
pub fn layout(chrome: &Chrome<'_>, title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="da" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (chrome.app_name) }
                link rel="stylesheet" href="/static/css/site.css";
            }
            body {
                header { (navigation(chrome)) }
                main {
                    (flashes(chrome.flashes))
                    (body)
                }
                footer {
                    p { "© " (Utc::now().year()) " " (chrome.app_name) }
                }
            }
        }
    }
}

/// `200 OK` with an HTML body.
pub fn html_response(markup: Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(markup.into_string())
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}
