//! Correlation id carried by every request.
//!
//! The [`Trace`](crate::middleware::Trace) middleware opens a task-local scope
//! per request; error payloads, the `trace-id` header and spans around
//! blocking work (password hashing, migrations) read it from there.
//! Task-locals do not cross `spawn_blocking`, so callers copy the id into a
//! span before handing work off.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// UUID identifying one request in logs, headers and error bodies.
///
/// # Examples
/// ```
/// use vidensbank::TraceId;
///
/// let id: TraceId = "6f1c2c1e-9a52-4d3e-8c43-2f5f0f6c1b7a".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2c1e-9a52-4d3e-8c43-2f5f0f6c1b7a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// A fresh random id.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// The id in scope, or a fresh one for work started outside a request.
    pub(crate) fn current_or_new() -> Self {
        Self::current().unwrap_or_else(Self::generate)
    }

    /// Run `fut` with `trace_id` as the current id.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn scope_exposes_the_id_and_ends_with_it() {
        let id = TraceId::generate();

        let inside = TraceId::scope(id, async { TraceId::current() }).await;

        assert_eq!(inside, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn current_or_new_prefers_the_request_id() {
        let id = TraceId::generate();

        let inside = TraceId::scope(id, async { TraceId::current_or_new() }).await;
        let outside = TraceId::current_or_new();

        assert_eq!(inside, id);
        assert_ne!(outside, id);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn malformed_ids_are_rejected(#[case] raw: &str) {
        assert!(raw.parse::<TraceId>().is_err());
    }
}
