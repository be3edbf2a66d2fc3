//! Span macros and span recording helpers

/// Create a span with common HTTP request fields
///
/// # Example
///
/// ```rust
/// use nudge_observability::http_request_span;
///
/// let span = http_request_span!("POST", "/api/chat", "12345");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! http_request_span {
    ($method:expr, $path:expr, $request_id:expr) => {
        tracing::info_span!(
            "http.request",
            http.method = $method,
            http.route = $path,
            http.status_code = tracing::field::Empty,
            request.id = $request_id,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Create a span around one model invocation
///
/// # Example
///
/// ```rust
/// use nudge_observability::llm_call_span;
///
/// let span = llm_call_span!("openai", "gpt-4o-mini", 2);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! llm_call_span {
    ($provider:expr, $model:expr, $biased_tokens:expr) => {
        tracing::info_span!(
            "llm.call",
            llm.provider = $provider,
            llm.model = $model,
            llm.biased_tokens = $biased_tokens,
            llm.duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span
///
/// Fills the `error` / `error.message` fields declared by the span macros
/// above and emits an error event.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::error!(error = %error, "Operation failed");
}

/// Record latency/duration on the current span
///
/// The field must have been declared on the span (e.g. `llm.duration_ms`).
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
