//! Published content pages and keyword search.

use chrono::{DateTime, Utc};
use pagination::{Page as ResultPage, PageRequest};
use serde::Serialize;

use super::slug::Slug;

/// Number of search hits shown per page.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Notice shown when search storage fails.
pub const SEARCH_UNAVAILABLE_NOTICE: &str = "Der opstod en fejl under søgningen. Prøv igen.";

/// Database identifier of a content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageId(i64);

impl PageId {
    /// Wrap a raw identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier for persistence.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// A content page as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPage {
    pub id: PageId,
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub topic: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentPage {
    /// Leading part of the body for result listings, cut on a character
    /// boundary.
    ///
    /// # Examples
    /// ```
    /// # use chrono::Utc;
    /// # use vidensbank::domain::{ContentPage, PageId, Slug};
    /// let page = ContentPage {
    ///     id: PageId::new(1),
    ///     title: "Kød".into(),
    ///     slug: Slug::new("kod").unwrap(),
    ///     content: "Økologisk oksekød".into(),
    ///     topic: "emissioner".into(),
    ///     is_published: true,
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// assert_eq!(page.excerpt(4), "Økol…");
    /// assert_eq!(page.excerpt(100), "Økologisk oksekød");
    /// ```
    pub fn excerpt(&self, max_chars: usize) -> String {
        match self.content.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}…", self.content.get(..cut).unwrap_or_default()),
            None => self.content.clone(),
        }
    }
}

/// Trimmed search text.
///
/// An empty query is valid and matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim raw input into a query.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_owned())
    }

    /// Whether the query would match nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ILIKE` pattern matching the query as a literal substring.
    ///
    /// `%`, `_` and `\` are escaped with a backslash, PostgreSQL's default
    /// `LIKE` escape character.
    ///
    /// # Examples
    /// ```
    /// use vidensbank::domain::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::new(" 100% ").like_pattern(), r"%100\%%");
    /// ```
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Case-insensitive literal containment, as the `ILIKE` pattern matches.
    pub fn matches(&self, page: &ContentPage) -> bool {
        if self.is_empty() {
            return false;
        }
        let needle = self.0.to_lowercase();
        page.title.to_lowercase().contains(&needle)
            || page.content.to_lowercase().contains(&needle)
    }
}

/// Search results plus an optional visitor-facing notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub results: ResultPage<ContentPage>,
    pub notice: Option<&'static str>,
}

impl SearchOutcome {
    /// Outcome with no hits and no notice.
    pub fn empty(query: SearchQuery, request: PageRequest) -> Self {
        Self {
            query,
            results: ResultPage::empty(request),
            notice: None,
        }
    }

    /// Outcome for a failed lookup.
    pub fn unavailable(query: SearchQuery, request: PageRequest) -> Self {
        Self {
            notice: Some(SEARCH_UNAVAILABLE_NOTICE),
            ..Self::empty(query, request)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn page() -> ContentPage {
        ContentPage {
            id: PageId::new(7),
            title: "Oksekød og klima".to_owned(),
            slug: Slug::new("oksekod-og-klima").expect("valid slug"),
            content: "Drøvtyggere udleder metan; 100% græsfodret kød er ingen undtagelse."
                .to_owned(),
            topic: "emissioner".to_owned(),
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("  klima  ", "klima")]
    #[case("\t", "")]
    fn query_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(SearchQuery::new(raw).as_str(), expected);
    }

    #[rstest]
    #[case("kød", "%kød%")]
    #[case("50%", r"%50\%%")]
    #[case("a_b", r"%a\_b%")]
    #[case(r"c:\x", r"%c:\\x%")]
    fn like_pattern_escapes_wildcards(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(SearchQuery::new(raw).like_pattern(), expected);
    }

    #[rstest]
    #[case("OKSEKØD", true)]
    #[case("metan", true)]
    #[case("100%", true)]
    #[case("svin", false)]
    #[case("", false)]
    fn matches_title_or_content(page: ContentPage, #[case] raw: &str, #[case] expected: bool) {
        assert_eq!(SearchQuery::new(raw).matches(&page), expected);
    }

    #[rstest]
    fn unavailable_outcome_carries_notice() {
        let outcome = SearchOutcome::unavailable(SearchQuery::new("x"), PageRequest::default());
        assert!(outcome.results.items().is_empty());
        assert_eq!(outcome.notice, Some(SEARCH_UNAVAILABLE_NOTICE));
    }
}
