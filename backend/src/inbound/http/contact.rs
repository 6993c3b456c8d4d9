//! Contact form.
//!
//! ```text
//! GET  /contact
//! POST /contact  name=...&email=...&subject=...&message=...
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::ContactSubmission;
use crate::domain::ports::{CONTACT_FAILED_MESSAGE, CONTACT_THANKS_MESSAGE};

use super::context::PageContext;
use super::error::PageResult;
use super::session::{FlashLevel, SessionContext};
use super::state::HttpState;
use super::views::{self, forms};

/// Body of `POST /contact`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Render the contact form.
#[get("/contact")]
pub async fn contact_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let context = PageContext::load(&state, &session).await?;
    Ok(views::html_response(forms::contact(&context.chrome(&state))))
}

/// Store an inquiry and return to the form with the outcome.
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<ContactForm>,
) -> PageResult<HttpResponse> {
    let ContactForm {
        name,
        email,
        subject,
        message,
    } = form.into_inner();

    match ContactSubmission::try_from_parts(&name, &email, &subject, &message) {
        Err(err) => session.push_flash(FlashLevel::Error, err.user_message())?,
        Ok(submission) => match state.contact.submit(&submission).await {
            Ok(_) => session.push_flash(FlashLevel::Success, CONTACT_THANKS_MESSAGE)?,
            Err(_) => session.push_flash(FlashLevel::Error, CONTACT_FAILED_MESSAGE)?,
        },
    }
    Ok(views::redirect("/contact"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::Arc;

    use crate::domain::ports::{ContactIntake, MockContactIntake};
    use crate::domain::{Error, Inquiry};
    use crate::inbound::http::state::{HttpState, SiteSettings};
    use crate::inbound::http::test_utils::{
        fixture_ports, fixture_state, session_cookie, test_session_middleware,
    };

    struct BrokenIntake;

    #[async_trait]
    impl ContactIntake for BrokenIntake {
        async fn submit(&self, _submission: &ContactSubmission) -> Result<Inquiry, Error> {
            Err(Error::internal("transaction rolled back"))
        }
    }

    async fn submit_and_follow(state: HttpState, fields: &[(&str, &str)]) -> String {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(contact_form)
                .service(submit_contact),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/contact")
                .set_form(fields)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/contact")
        );
        let cookie = session_cookie(&res).expect("flash cookie");

        let page = test::call_service(
            &app,
            test::TestRequest::get().uri("/contact").cookie(cookie).to_request(),
        )
        .await;
        String::from_utf8_lossy(&test::read_body(page).await).into_owned()
    }

    #[rstest]
    #[case([("name", "Ole"), ("email", "ole@firma.dk"), ("subject", "Kantine"), ("message", "Hej")], CONTACT_THANKS_MESSAGE)]
    #[case([("name", "Ole"), ("email", "ole@firma.dk"), ("subject", "Kantine"), ("message", "  ")], "Alle felter skal udfyldes.")]
    #[case([("name", "Ole"), ("email", "ole.firma.dk"), ("subject", "Kantine"), ("message", "Hej")], "Indtast en gyldig email adresse.")]
    #[actix_web::test]
    async fn submission_outcome_is_flashed(
        #[case] fields: [(&str, &str); 4],
        #[case] notice: &str,
    ) {
        let page = submit_and_follow(fixture_state(), &fields).await;

        assert!(page.contains(notice), "missing {notice:?}");
    }

    #[rstest]
    #[actix_web::test]
    async fn storage_failure_is_reported_generically() {
        let mut ports = fixture_ports();
        ports.contact = Arc::new(BrokenIntake);
        let state = HttpState::new(ports, SiteSettings::default());

        let page = submit_and_follow(
            state,
            &[
                ("name", "Ole"),
                ("email", "ole@firma.dk"),
                ("subject", "Kantine"),
                ("message", "Hej"),
            ],
        )
        .await;

        assert!(page.contains(CONTACT_FAILED_MESSAGE));
        assert!(!page.contains("rolled back"));
    }

    #[rstest]
    #[case(&[("name", "Ole"), ("email", "ole@firma.dk"), ("subject", "Kantine")])]
    #[case(&[("name", "Ole"), ("email", "ole@firma.dk"), ("subject", "Kantine"), ("message", "")])]
    #[case(&[("name", ""), ("email", "ole@firma.dk"), ("subject", "Kantine"), ("message", "Hej")])]
    #[actix_web::test]
    async fn incomplete_submission_is_never_stored(#[case] fields: &[(&str, &str)]) {
        let mut intake = MockContactIntake::new();
        intake.expect_submit().times(0);
        let mut ports = fixture_ports();
        ports.contact = Arc::new(intake);
        let state = HttpState::new(ports, SiteSettings::default());

        let page = submit_and_follow(state, fields).await;

        assert!(page.contains("Alle felter skal udfyldes."));
    }
}
