//! Per-request trace id, carried in tokio task-local storage.
//!
//! `RequestTrace` opens the scope; error rendering reads it back so the
//! problem body and the `x-trace-id` header always agree.

use std::future::Future;

use tokio::task_local;

const UNSCOPED: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNSCOPED.to_string())
}

/// Drive `future` with `trace_id` visible to [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
