//! Signed-in views: the member dashboard and the admin overview.

use chrono::{DateTime, Utc};
use maud::{Markup, html};

use crate::domain::User;
use crate::domain::ports::AdminOverview;

use super::{Chrome, layout};

fn date(at: DateTime<Utc>) -> String {
    at.format("%d.%m.%Y %H:%M").to_string()
}

/// Dashboard for the signed-in `user`.
pub fn dashboard(chrome: &Chrome<'_>, user: &User) -> Markup {
    layout(
        chrome,
        "Min side",
        html! {
            h1 { "Velkommen, " (user.username().as_ref()) }
            dl.profile {
                dt { "E-mail" }
                dd { (user.email().as_ref()) }
                dt { "Rolle" }
                dd { (user.role().as_str()) }
                dt { "Oprettet" }
                dd { (date(user.created_at())) }
            }
            ul.shortcuts {
                li { a href="/calculator" { "Beregn CO2-aftryk" } }
                li { a href="/search" { "Søg i vidensbanken" } }
                @if user.is_admin() {
                    li { a href="/admin" { "Administration" } }
                }
            }
        },
    )
}

/// Admin overview of users, pages and inquiries.
pub fn admin(chrome: &Chrome<'_>, overview: &AdminOverview) -> Markup {
    layout(
        chrome,
        "Administration",
        html! {
            h1 { "Administration" }
            section #users {
                h2 { "Brugere (" (overview.users.len()) ")" }
                table {
                    thead { tr { th { "Brugernavn" } th { "E-mail" } th { "Rolle" } th { "Oprettet" } } }
                    tbody {
                        @for user in &overview.users {
                            tr {
                                td { (user.username().as_ref()) }
                                td { (user.email().as_ref()) }
                                td { (user.role().as_str()) }
                                td { (date(user.created_at())) }
                            }
                        }
                    }
                }
            }
            section #pages {
                h2 { "Sider (" (overview.pages.len()) ")" }
                table {
                    thead { tr { th { "Titel" } th { "Emne" } th { "Status" } th { "Opdateret" } } }
                    tbody {
                        @for page in &overview.pages {
                            tr {
                                td { a href={ "/pages/" (page.slug.as_ref()) } { (page.title) } }
                                td { (page.topic) }
                                td { @if page.is_published { "Publiceret" } @else { "Kladde" } }
                                td { (date(page.updated_at)) }
                            }
                        }
                    }
                }
            }
            section #inquiries {
                h2 { "Henvendelser (" (overview.inquiries.len()) ")" }
                @if overview.inquiries.is_empty() {
                    p { "Ingen henvendelser endnu." }
                } @else {
                    table {
                        thead { tr { th { "Modtaget" } th { "Navn" } th { "E-mail" } th { "Emne" } th { "Status" } } }
                        tbody {
                            @for inquiry in &overview.inquiries {
                                tr {
                                    td { (date(inquiry.submitted_at)) }
                                    td { (inquiry.name) }
                                    td { (inquiry.email) }
                                    td { (inquiry.subject) }
                                    td { (inquiry.status.label()) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::fixtures::{fixture_admin, fixture_member};
    use crate::domain::{Inquiry, InquiryId, InquiryStatus};
    use rstest::rstest;

    #[rstest]
    fn dashboard_greets_member() {
        let member = fixture_member().expect("member fixture");
        let html = dashboard(&Chrome::bare(), &member).into_string();

        assert!(html.contains("Velkommen, anna"));
        assert!(!html.contains("Administration"));
    }

    #[rstest]
    fn admin_lists_every_section() {
        let overview = AdminOverview {
            users: vec![fixture_admin().expect("admin fixture")],
            pages: Vec::new(),
            inquiries: vec![Inquiry {
                id: InquiryId::new(1),
                name: "Ole".to_owned(),
                email: "ole@firma.dk".to_owned(),
                subject: "<b>Kantine</b>".to_owned(),
                message: "Hej".to_owned(),
                submitted_at: Utc::now(),
                status: InquiryStatus::New,
            }],
        };
        let html = admin(&Chrome::bare(), &overview).into_string();

        assert!(html.contains("Brugere (1)"));
        assert!(html.contains("Sider (0)"));
        assert!(html.contains("ole@firma.dk"));
        assert!(html.contains("&lt;b&gt;Kantine"));
    }
}
