//! Page slugs.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens, at most [`SLUG_MAX`] characters long.

use std::fmt;

use serde::Serialize;

/// Maximum slug length, matching the `pages.slug` column.
pub const SLUG_MAX: usize = 200;

/// Rejected slug value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid page slug: {value:?}")]
pub struct SlugError {
    value: String,
}

/// Unique, URL-safe page identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Validate a slug without normalising it.
    ///
    /// # Examples
    /// ```
    /// use vidensbank::domain::Slug;
    ///
    /// assert!(Slug::new("okologi-i-kantinen").is_ok());
    /// assert!(Slug::new("Økologi").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if is_valid_slug(&value) {
            Ok(Self(value))
        } else {
            Err(SlugError { value })
        }
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && value.len() <= SLUG_MAX && has_allowed_slug_chars(value)
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("klimadata", true)]
    #[case("fodevare-relaterede-emissioner", true)]
    #[case("2024-rapport", true)]
    #[case("", false)]
    #[case(" klimadata", false)]
    #[case("Klimadata", false)]
    #[case("økologi", false)]
    #[case("a_b", false)]
    fn validates_allowed_characters(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(Slug::new(value).is_ok(), valid);
    }

    #[rstest]
    fn rejects_overlong_slugs() {
        assert!(Slug::new("a".repeat(SLUG_MAX)).is_ok());
        assert!(Slug::new("a".repeat(SLUG_MAX + 1)).is_err());
    }
}
