//! Axum router assembly.

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tracing::Span;

use relayhub_app::ports::GpioAdapter;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// API routes live under `/api` and dashboard routes at `/`; both sit behind
/// the access-token middleware. `/health` and `/_shutdown` are left open.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem. Its span records the path
/// only, so a `?token=` query never reaches the logs.
pub fn build<G>(state: AppState<G>) -> Router
where
    G: GpioAdapter + 'static,
{
    let protected = Router::new()
        .nest("/api", crate::api::routes::<G>())
        .merge(crate::dashboard::routes::<G>())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_token::<G>,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/_shutdown", post(crate::shutdown::hook::<G>))
        .merge(protected)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

fn request_span(request: &Request<Body>) -> Span {
    tracing::debug_span!(
        target: "tower_http::trace",
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}
