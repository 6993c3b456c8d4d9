//! Navigation links for paginated listings.

use serde::Serialize;
use url::form_urlencoded;

/// One entry in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageLink {
    /// A page the visitor can navigate to.
    Number(u32),
    /// The page currently displayed.
    Current(u32),
    /// A run of skipped page numbers.
    Gap,
}

/// Build a link to `page` of `path`, preserving the other query parameters.
///
/// Parameters are percent-encoded in the given order and `page` is appended
/// last.
///
/// # Examples
/// ```
/// use pagination::page_href;
///
/// assert_eq!(
///     page_href("/search", &[("q", "grøn energi")], 2),
///     "/search?q=gr%C3%B8n+energi&page=2"
/// );
/// ```
#[must_use]
pub fn page_href(path: &str, params: &[(&str, &str)], page: u32) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        query.append_pair(name, value);
    }
    query.append_pair("page", &page.to_string());
    format!("{path}?{}", query.finish())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for link rendering.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], 1, "/search?page=1")]
    #[case(&[("q", "oksekød")], 3, "/search?q=oksek%C3%B8d&page=3")]
    #[case(&[("q", "a&b=c")], 2, "/search?q=a%26b%3Dc&page=2")]
    fn encodes_parameters(
        #[case] params: &[(&str, &str)],
        #[case] page: u32,
        #[case] expected: &str,
    ) {
        assert_eq!(page_href("/search", params, page), expected);
    }
}
