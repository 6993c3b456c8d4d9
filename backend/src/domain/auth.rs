//! Authentication primitives: login credentials, registration input,
//! redirect targets and the admin capability.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::user::{EmailAddress, User, UserValidationError, Username};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;

/// Where a successful login lands when no usable `next` target is given.
pub const DEFAULT_LOGIN_REDIRECT: &str = "/dashboard";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use vidensbank::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" anna ", "hemmelig").unwrap();
/// assert_eq!(creds.username(), "anna");
/// assert_eq!(creds.password(), "hemmelig");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for exact-match lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Reasons a registration form is rejected before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    /// At least one field was blank.
    #[error("all fields are required")]
    MissingField,
    /// Username was shorter than the minimum.
    #[error("username too short")]
    UsernameTooShort,
    /// Username or email failed validation.
    #[error("{0}")]
    InvalidField(UserValidationError),
    /// Password was shorter than [`PASSWORD_MIN`].
    #[error("password too short")]
    PasswordTooShort,
    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl RegistrationValidationError {
    /// Visitor-facing message rendered above the form.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingField => "Alle felter skal udfyldes",
            Self::UsernameTooShort => "Brugernavn skal være mindst 3 tegn",
            Self::InvalidField(UserValidationError::UsernameTooLong { .. }) => {
                "Brugernavnet er for langt"
            }
            Self::InvalidField(_) => "Indtast en gyldig email adresse.",
            Self::PasswordTooShort => "Adgangskode skal være mindst 8 tegn",
            Self::PasswordMismatch => "Adgangskoderne matcher ikke",
        }
    }
}

/// Validated registration request.
///
/// ## Invariants
/// - `username` satisfies [`Username`] rules.
/// - `email` is lowercased and has the minimal email shape.
/// - `password` has at least [`PASSWORD_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration fields in the order visitors see errors.
    ///
    /// # Examples
    /// ```
    /// use vidensbank::domain::{Registration, RegistrationValidationError};
    ///
    /// let ok = Registration::try_from_parts("anna", "Anna@Firma.dk", "langtkodeord", "langtkodeord");
    /// assert_eq!(ok.expect("valid").email().as_ref(), "anna@firma.dk");
    ///
    /// let err = Registration::try_from_parts("anna", "anna@firma.dk", "langtkodeord", "andet");
    /// assert_eq!(err, Err(RegistrationValidationError::PasswordMismatch));
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<Self, RegistrationValidationError> {
        if [username.trim(), email.trim(), password, password_confirm]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(RegistrationValidationError::MissingField);
        }
        let username = Username::new(username).map_err(|error| match error {
            UserValidationError::UsernameTooShort { .. } => {
                RegistrationValidationError::UsernameTooShort
            }
            other => RegistrationValidationError::InvalidField(other),
        })?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort);
        }
        if password != password_confirm {
            return Err(RegistrationValidationError::PasswordMismatch);
        }
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::InvalidField)?;
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email, lowercased.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// One-way password digest in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a stored PHC string.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Choose the post-login destination.
///
/// Only same-origin relative paths are honoured: the target must start with
/// `/` and must not start with `//` or `/\`, which browsers treat as
/// protocol-relative URLs.
///
/// # Examples
/// ```
/// use vidensbank::domain::safe_redirect_target;
///
/// assert_eq!(safe_redirect_target(Some("/admin")), "/admin");
/// assert_eq!(safe_redirect_target(Some("https://evil.example")), "/dashboard");
/// assert_eq!(safe_redirect_target(Some("//evil.example")), "/dashboard");
/// assert_eq!(safe_redirect_target(None), "/dashboard");
/// ```
pub fn safe_redirect_target(next: Option<&str>) -> &str {
    match next {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.starts_with("/\\")
                && !target.chars().any(char::is_control) =>
        {
            target
        }
        _ => DEFAULT_LOGIN_REDIRECT,
    }
}

/// Proof that the current user holds the administrator role.
///
/// The only constructor checks the role, so any function taking
/// `&AdminCapability` cannot be reached by a non-admin.
#[derive(Debug)]
pub struct AdminCapability {
    holder: User,
}

impl AdminCapability {
    /// Grant the capability when `user` is an administrator.
    pub fn for_user(user: User) -> Option<Self> {
        user.is_admin().then_some(Self { holder: user })
    }

    /// The administrator holding this capability.
    pub fn holder(&self) -> &User {
        &self.holder
    }
}
