//! Contact inquiries submitted through the public form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::user::has_email_shape;

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 120;
const SUBJECT_MAX: usize = 200;

/// Why a contact submission was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// A required field was blank after trimming.
    #[error("all contact fields are required")]
    MissingField,
    /// Email lacks the minimal `@` and `.` structure.
    #[error("contact email is not valid")]
    InvalidEmail,
    /// A field exceeds its storage limit.
    #[error("contact field {field} is too long")]
    TooLong { field: &'static str },
}

impl ContactValidationError {
    /// Visitor-facing flash message.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField => "Alle felter skal udfyldes.",
            Self::InvalidEmail => "Indtast en gyldig email adresse.",
            Self::TooLong { .. } => "Et eller flere felter er for lange.",
        }
    }
}

/// Validated contact form fields.
///
/// ## Invariants
/// - Every field is trimmed and non-empty.
/// - `email` contains `@` and `.`.
/// - Name, email and subject fit their columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl ContactSubmission {
    /// Validate raw form fields.
    ///
    /// # Examples
    /// ```
    /// use vidensbank::domain::{ContactSubmission, ContactValidationError};
    ///
    /// let ok = ContactSubmission::try_from_parts("Ole", "ole@firma.dk", "Tilbud", "Hej!");
    /// assert!(ok.is_ok());
    ///
    /// let missing = ContactSubmission::try_from_parts("Ole", "ole@firma.dk", "Tilbud", "  ");
    /// assert_eq!(missing, Err(ContactValidationError::MissingField));
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Self, ContactValidationError> {
        let (name, email, subject, message) =
            (name.trim(), email.trim(), subject.trim(), message.trim());
        if [name, email, subject, message].iter().any(|f| f.is_empty()) {
            return Err(ContactValidationError::MissingField);
        }
        if !has_email_shape(email) {
            return Err(ContactValidationError::InvalidEmail);
        }
        for (field, value, max) in [
            ("name", name, NAME_MAX),
            ("email", email, EMAIL_MAX),
            ("subject", subject, SUBJECT_MAX),
        ] {
            if value.chars().count() > max {
                return Err(ContactValidationError::TooLong { field });
            }
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        })
    }

    /// Sender name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender email as typed, trimmed.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Handling state of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    /// Not yet opened.
    #[default]
    New,
    /// Opened by staff.
    Read,
    /// Answered.
    Replied,
}

impl InquiryStatus {
    /// Storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }

    /// Danish label for listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "Ny",
            Self::Read => "Læst",
            Self::Replied => "Besvaret",
        }
    }

    /// Whether moving to `next` follows the usual new → read → replied flow.
    ///
    /// Advisory only; storage accepts any known status.
    pub fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Read) | (Self::Read, Self::Replied) | (Self::New, Self::Replied)
        )
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored status string that is not a known [`InquiryStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown inquiry status: {0}")]
pub struct UnknownInquiryStatus(pub String);

impl FromStr for InquiryStatus {
    type Err = UnknownInquiryStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(UnknownInquiryStatus(other.to_owned())),
        }
    }
}

/// Database identifier of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct InquiryId(i64);

impl InquiryId {
    /// Wrap a raw identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// A stored inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
    pub status: InquiryStatus,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a@b.dk", "s", "m")]
    #[case("n", "  ", "s", "m")]
    #[case("n", "a@b.dk", "", "m")]
    #[case("n", "a@b.dk", "s", "\n\t")]
    fn blank_fields_are_rejected(
        #[case] name: &str,
        #[case] email: &str,
        #[case] subject: &str,
        #[case] message: &str,
    ) {
        assert_eq!(
            ContactSubmission::try_from_parts(name, email, subject, message),
            Err(ContactValidationError::MissingField)
        );
    }

    #[rstest]
    #[case("ole.firma.dk")]
    #[case("ole@firma")]
    fn email_needs_at_and_dot(#[case] email: &str) {
        let err = ContactSubmission::try_from_parts("Ole", email, "Emne", "Besked")
            .expect_err("invalid email");
        assert_eq!(err.user_message(), "Indtast en gyldig email adresse.");
    }

    #[rstest]
    fn overlong_subject_is_rejected() {
        let subject = "x".repeat(SUBJECT_MAX + 1);
        assert_eq!(
            ContactSubmission::try_from_parts("Ole", "ole@firma.dk", &subject, "Besked"),
            Err(ContactValidationError::TooLong { field: "subject" })
        );
    }

    #[rstest]
    fn fields_are_trimmed() {
        let submission =
            ContactSubmission::try_from_parts(" Ole ", " ole@firma.dk ", " Emne ", " Besked ")
                .expect("valid submission");
        assert_eq!(submission.name(), "Ole");
        assert_eq!(submission.email(), "ole@firma.dk");
        assert_eq!(submission.subject(), "Emne");
        assert_eq!(submission.message(), "Besked");
    }

    #[rstest]
    #[case(InquiryStatus::New, InquiryStatus::Read, true)]
    #[case(InquiryStatus::Read, InquiryStatus::Replied, true)]
    #[case(InquiryStatus::New, InquiryStatus::Replied, true)]
    #[case(InquiryStatus::Replied, InquiryStatus::New, false)]
    #[case(InquiryStatus::Read, InquiryStatus::New, false)]
    #[case(InquiryStatus::Read, InquiryStatus::Read, false)]
    fn status_flow_is_forward_only(
        #[case] from: InquiryStatus,
        #[case] to: InquiryStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_advance_to(to), allowed);
    }

    #[rstest]
    fn status_parses_storage_values() {
        assert_eq!("replied".parse::<InquiryStatus>(), Ok(InquiryStatus::Replied));
        assert!("archived".parse::<InquiryStatus>().is_err());
    }
}
