//! Request spans for the HTTP stack.

use axum::extract::MatchedPath;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

/// Builds one `request` span per HTTP request.
///
/// The span is named by the route template (`/{code}`, `/api/urls/{id}`)
/// rather than the raw URI, so short codes and ids do not fan out into
/// distinct span names. `user_id` starts empty and is filled by
/// [`super::auth::layer`] once a bearer token is verified.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or("unmatched");

        tracing::info_span!(
            "request",
            method = %request.method(),
            route,
            uri = %request.uri(),
            user_id = tracing::field::Empty,
        )
    }
}

/// Tracing layer installed on the top-level router.
///
/// Responses are logged at `INFO` with latency in milliseconds; 5xx
/// responses are additionally reported at `ERROR`.
///
/// ```text
/// INFO request{method=DELETE route=/api/urls/{id} uri=/api/urls/7 user_id=3}: finished processing request latency=4 ms status=200
/// ```
///
/// ```rust,ignore
/// Router::new()
///     .route("/{code}", get(redirect_handler))
///     .nest("/api", public.merge(protected))
///     .with_state(state)
///     .layer(tracing::layer());
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
