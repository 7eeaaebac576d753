//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use relayhub_domain::error::RelayError;

/// JSON error body returned for rejected requests.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// JSON error body returned when the hardware write fails.
#[derive(Serialize)]
struct ActuationBody {
    ok: bool,
    error: String,
}

/// Errors surfaced at the HTTP boundary.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or mismatched access token.
    Unauthorized,
    /// A relay operation failed.
    Relay(RelayError),
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self::Relay(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "unauthorized".to_string(),
                }),
            )
                .into_response(),
            Self::Relay(err @ (RelayError::InvalidTarget(_) | RelayError::InvalidAction(_))) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            )
                .into_response(),
            Self::Relay(err @ RelayError::Actuation { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ActuationBody {
                    ok: false,
                    error: err.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
