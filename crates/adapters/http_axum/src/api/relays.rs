//! JSON handlers for relays.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::ser::Serializer;

use relayhub_app::ports::GpioAdapter;
use relayhub_domain::pin::{PinId, RelaySet};
use relayhub_domain::relay::RelayState;

use crate::error::ApiError;
use crate::state::AppState;

/// Pin → state map that keeps configuration order when serialized.
#[derive(Debug)]
pub struct StateMap(pub Vec<(PinId, RelayState)>);

impl Serialize for StateMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(pin, state)| (pin, state)))
    }
}

/// Body of `GET /api/relays`.
#[derive(Debug, Serialize)]
pub struct RelayList {
    pub pins: RelaySet,
    pub state: StateMap,
}

/// Body of a successful `POST /api/relay/{pin}/{action}`.
#[derive(Debug, Serialize)]
pub struct RelayChanged {
    pub ok: bool,
    pub pin: PinId,
    pub state: RelayState,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<RelayList>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the set endpoint.
pub enum SetResponse {
    Ok(Json<RelayChanged>),
}

impl IntoResponse for SetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/relays`
pub async fn list<G>(State(state): State<AppState<G>>) -> ListResponse
where
    G: GpioAdapter + 'static,
{
    let service = &state.relay_service;
    ListResponse::Ok(Json(RelayList {
        pins: service.relays().clone(),
        state: StateMap(service.list()),
    }))
}

/// `POST /api/relay/{pin}/{action}`
///
/// `pin` is taken as raw text so that non-numeric segments are reported as
/// an invalid target rather than an extractor rejection.
pub async fn set<G>(
    State(state): State<AppState<G>>,
    Path((pin, action)): Path<(String, String)>,
) -> Result<SetResponse, ApiError>
where
    G: GpioAdapter + 'static,
{
    let change = state.relay_service.execute(&pin, &action)?;
    Ok(SetResponse::Ok(Json(RelayChanged {
        ok: true,
        pin: change.pin,
        state: change.state,
    })))
}
