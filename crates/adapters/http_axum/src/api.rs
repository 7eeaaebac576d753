//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod relays;

use axum::Router;
use axum::routing::{get, post};

use relayhub_app::ports::GpioAdapter;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<G>() -> Router<AppState<G>>
where
    G: GpioAdapter + 'static,
{
    Router::new()
        .route("/relays", get(relays::list::<G>))
        .route("/relay/{pin}/{action}", post(relays::set::<G>))
}
