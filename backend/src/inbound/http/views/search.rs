//! Search results.

use maud::{Markup, html};
use pagination::{PageLink, page_href};

use crate::domain::SearchOutcome;

use super::{Chrome, layout};

const EXCERPT_CHARS: usize = 200;

fn pager(outcome: &SearchOutcome) -> Markup {
    let query = outcome.query.as_str();
    let params = [("q", query)];
    let results = &outcome.results;
    let links = results.links();
    html! {
        @if !links.is_empty() {
            nav.pagination aria-label="Sider" {
                @if let Some(prev) = results.prev_page() {
                    a.prev href=(page_href("/search", &params, prev)) { "Forrige" }
                }
                @for link in links {
                    @match link {
                        PageLink::Number(number) => {
                            a href=(page_href("/search", &params, number)) { (number) }
                        }
                        PageLink::Current(number) => {
                            span.current aria-current="page" { (number) }
                        }
                        PageLink::Gap => { span.gap { "…" } }
                    }
                }
                @if let Some(next) = results.next_page() {
                    a.next href=(page_href("/search", &params, next)) { "Næste" }
                }
            }
        }
    }
}

/// Render the search page for `outcome`.
pub fn results(chrome: &Chrome<'_>, outcome: &SearchOutcome) -> Markup {
    let query = outcome.query.as_str();
    layout(
        chrome,
        "Søgning",
        html! {
            h1 { "Søgning" }
            form.search-form action="/search" method="get" {
                input type="search" name="q" value=(query) aria-label="Søg";
                button type="submit" { "Søg" }
            }
            @if let Some(notice) = outcome.notice {
                p.notice role="alert" { (notice) }
            }
            @if !outcome.query.is_empty() {
                p.summary { (outcome.results.total()) " resultater for \"" (query) "\"" }
                @if outcome.results.items().is_empty() {
                    p { "Ingen sider matchede din søgning." }
                } @else {
                    ol.results {
                        @for page in outcome.results.items() {
                            li {
                                a href={ "/pages/" (page.slug.as_ref()) } { (page.title) }
                                p.excerpt { (page.excerpt(EXCERPT_CHARS)) }
                            }
                        }
                    }
                }
                (pager(outcome))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use pagination::{Page, PageRequest};
    use rstest::rstest;

    use crate::domain::{ContentPage, PageId, SearchQuery, Slug};

    fn hit(id: i64) -> ContentPage {
        ContentPage {
            id: PageId::new(id),
            title: format!("Klimaside {id}"),
            slug: Slug::new(format!("klimaside-{id}")).expect("valid slug"),
            content: "Oksekød har et højt aftryk.".to_owned(),
            topic: "emissioner".to_owned(),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn renders_hits_with_paging_links() {
        let request = PageRequest::new(2, 10).expect("valid request");
        let outcome = SearchOutcome {
            query: SearchQuery::new("kød & co"),
            results: Page::new(vec![hit(11), hit(12)], request, 25),
            notice: None,
        };
        let html = results(&Chrome::bare(), &outcome).into_string();

        assert!(html.contains("href=\"/pages/klimaside-11\""));
        assert!(html.contains("25 resultater"));
        assert!(html.contains("href=\"/search?q=k%C3%B8d+%26+co&amp;page=3\""));
        assert!(html.contains("aria-current=\"page\""));
    }

    #[rstest]
    fn empty_query_shows_only_the_form() {
        let request = PageRequest::lenient(None, 10);
        let outcome = SearchOutcome::empty(SearchQuery::new("  "), request);
        let html = results(&Chrome::bare(), &outcome).into_string();

        assert!(!html.contains("resultater"));
        assert!(!html.contains("class=\"pagination\""));
    }

    #[rstest]
    fn failure_notice_is_visible() {
        let request = PageRequest::lenient(None, 10);
        let outcome = SearchOutcome::unavailable(SearchQuery::new("kød"), request);
        let html = results(&Chrome::bare(), &outcome).into_string();

        assert!(html.contains("Der opstod en fejl under søgningen"));
    }
}
