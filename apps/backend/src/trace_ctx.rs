//! Per-request trace id, carried in Tokio task-local storage.
//!
//! `RequestTrace` establishes the scope; error rendering and log events read
//! it back without threading the id through every call.

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Fresh trace id for an incoming request.
pub fn new_trace_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Run `future` with `trace_id` visible to `trace_id()`.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn outside_scope_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn scope_is_visible_then_restored() {
        let inner = with_trace_id("req-1".to_string(), async {
            assert_eq!(trace_id(), "req-1");
            with_trace_id("req-2".to_string(), async { trace_id() }).await
        })
        .await;

        assert_eq!(inner, "req-2");
        assert_eq!(trace_id(), "unknown");
    }

    #[test]
    fn new_ids_are_distinct_hex() {
        let a = new_trace_id();
        let b = new_trace_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
