//! Request-scoped trace identifier for correlating logs and error responses.
//!
//! The identifier lives in tokio task-local storage for the duration of a
//! request. Task locals are not inherited by spawned tasks, so wrap spawned
//! work in [`TraceId::scope`] to keep correlation intact.

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use student_search::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
///     .parse()
///     .expect("valid UUID");
/// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
/// assert_eq!(observed, Some(trace_id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    #[rustfmt::skip]
    pub(crate) fn generate() -> Self { Self(Uuid::new_v4()) }

    /// Reuse a caller-supplied identifier when it parses as a UUID, otherwise
    /// mint a fresh one.
    pub(crate) fn from_header_or_generate(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Returns the current trace identifier if one is in scope.
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { TRACE_ID.try_with(|id| *id).ok() }

    /// Execute the provided future with the supplied trace identifier in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[test]
    fn header_value_is_reused_when_valid() {
        let raw = "6f1c1a3e-6b1e-4a59-9d47-0b6f2d7d1c11";
        let trace_id = TraceId::from_header_or_generate(Some(raw));
        assert_eq!(trace_id.to_string(), raw);
    }

    #[rstest]
    #[case::missing(None)]
    #[case::blank(Some("   "))]
    #[case::garbage(Some("not-a-uuid"))]
    fn invalid_header_values_fall_back_to_fresh_ids(#[case] raw: Option<&str>) {
        let trace_id = TraceId::from_header_or_generate(raw);
        assert!(Uuid::parse_str(&trace_id.to_string()).is_ok());
        assert_ne!(trace_id.to_string(), Uuid::nil().to_string());
    }
}
