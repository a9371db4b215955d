//! Span definitions per operation: session calls and hint ranking.

/// Create a span around one front-end call on a session.
#[macro_export]
macro_rules! session_span {
    ($session_id:expr, $call:expr) => {
        tracing::info_span!("sleuth.session", session_id = %$session_id, call = $call)
    };
}

/// Create a hint-ranking span.
#[macro_export]
macro_rules! ranking_span {
    ($candidates:expr, $provider:expr) => {
        tracing::info_span!("sleuth.ranking", candidates = $candidates, provider = %$provider)
    };
}
