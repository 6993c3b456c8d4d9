//! Error pages.

use actix_web::http::StatusCode;
use maud::{Markup, html};

use super::{Chrome, layout};

/// Notice shown when a request body exceeds the configured limit.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Filen er for stor. Maksimal størrelse er 16MB.";
/// Notice shown for forbidden resources.
pub const FORBIDDEN_MESSAGE: &str = "Du har ikke tilladelse til at tilgå denne side.";

fn copy_for(status: StatusCode) -> (&'static str, &'static str) {
    match status {
        StatusCode::NOT_FOUND => (
            "Siden blev ikke fundet",
            "Siden du leder efter findes ikke eller er blevet flyttet.",
        ),
        StatusCode::FORBIDDEN => ("Adgang nægtet", FORBIDDEN_MESSAGE),
        StatusCode::PAYLOAD_TOO_LARGE => ("For stor forespørgsel", PAYLOAD_TOO_LARGE_MESSAGE),
        StatusCode::UNAUTHORIZED => ("Log ind påkrævet", "Du skal være logget ind for at se denne side."),
        StatusCode::SERVICE_UNAVAILABLE => (
            "Tjenesten er midlertidigt utilgængelig",
            "Prøv igen om et øjeblik.",
        ),
        status if status.is_client_error() => (
            "Ugyldig forespørgsel",
            "Forespørgslen kunne ikke behandles.",
        ),
        _ => (
            "Der opstod en fejl",
            "Der opstod en uventet fejl. Prøv igen senere.",
        ),
    }
}

/// Full page for an error status.
pub fn error_page(status: StatusCode) -> Markup {
    let (heading, body) = copy_for(status);
    layout(
        &Chrome::bare(),
        heading,
        html! {
            section.error-page {
                h1 { (status.as_u16()) " – " (heading) }
                p { (body) }
                p { a href="/" { "Gå til forsiden" } }
            }
        },
    )
}
