//! Login, registration and contact forms.

use maud::{Markup, html};

use crate::domain::PASSWORD_MIN;

use super::{Chrome, layout};

/// Login form; `next` is carried through as a hidden field.
pub fn login(chrome: &Chrome<'_>, next: Option<&str>) -> Markup {
    layout(
        chrome,
        "Log ind",
        html! {
            h1 { "Log ind" }
            form.auth-form action="/login" method="post" {
                @if let Some(next) = next {
                    input type="hidden" name="next" value=(next);
                }
                label for="username" { "Brugernavn" }
                input #username type="text" name="username" autocomplete="username" required;
                label for="password" { "Adgangskode" }
                input #password type="password" name="password" autocomplete="current-password" required;
                button type="submit" { "Log ind" }
            }
            p { "Har du ikke en bruger? " a href="/register" { "Opret en her" } }
        },
    )
}

/// Registration form.
pub fn register(chrome: &Chrome<'_>) -> Markup {
    layout(
        chrome,
        "Opret bruger",
        html! {
            h1 { "Opret bruger" }
            form.auth-form action="/register" method="post" {
                label for="username" { "Brugernavn" }
                input #username type="text" name="username" autocomplete="username" required;
                label for="email" { "E-mail" }
                input #email type="email" name="email" autocomplete="email" required;
                label for="password" { "Adgangskode" }
                input #password type="password" name="password" minlength=(PASSWORD_MIN)
                    autocomplete="new-password" required;
                label for="password_confirm" { "Gentag adgangskode" }
                input #password_confirm type="password" name="password_confirm"
                    autocomplete="new-password" required;
                button type="submit" { "Opret bruger" }
            }
            p { "Har du allerede en bruger? " a href="/login" { "Log ind" } }
        },
    )
}

/// Contact form.
pub fn contact(chrome: &Chrome<'_>) -> Markup {
    layout(
        chrome,
        "Kontakt",
        html! {
            h1 { "Kontakt os" }
            p { "Skriv til os, så vender vi tilbage hurtigst muligt." }
            form.contact-form action="/contact" method="post" {
                label for="name" { "Navn" }
                input #name type="text" name="name" required;
                label for="email" { "E-mail" }
                input #email type="email" name="email" required;
                label for="subject" { "Emne" }
                input #subject type="text" name="subject" required;
                label for="message" { "Besked" }
                textarea #message name="message" rows="6" required {}
                button type="submit" { "Send" }
            }
        },
    )
}
