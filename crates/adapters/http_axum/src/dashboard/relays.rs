//! Dashboard form handler for relay controls.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};

use relayhub_app::ports::GpioAdapter;

use super::token_suffix;
use crate::auth::TokenQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// Response from the relay form handler (PRG pattern).
pub enum SubmitResponse {
    /// Redirect back to the overview.
    Redirect(Redirect),
}

impl IntoResponse for SubmitResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// `POST /relays/{pin}/{action}`: apply a command from a dashboard form.
pub async fn submit<G>(
    State(state): State<AppState<G>>,
    Path((pin, action)): Path<(String, String)>,
    Query(query): Query<TokenQuery>,
) -> Result<SubmitResponse, ApiError>
where
    G: GpioAdapter + 'static,
{
    state.relay_service.execute(&pin, &action)?;
    let target = format!("/{}", token_suffix(query.token.as_deref()));
    Ok(SubmitResponse::Redirect(Redirect::to(&target)))
}
