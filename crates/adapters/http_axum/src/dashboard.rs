//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! Relay controls are plain `<form>`s that POST back to the server and are
//! redirected to the overview (PRG pattern). The access token, when supplied
//! as `?token=`, is carried through every link and form action.

pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod relays;

use std::fmt::Write;

use axum::Router;
use axum::routing::{get, post};

use relayhub_app::ports::GpioAdapter;

use crate::state::AppState;

/// Build the dashboard sub-router for SSR HTML pages.
pub fn routes<G>() -> Router<AppState<G>>
where
    G: GpioAdapter + 'static,
{
    Router::new()
        .route("/", get(home::index::<G>))
        .route("/relays/{pin}/{action}", post(relays::submit::<G>))
}

/// `?token=...` suffix for links and form actions, or an empty string.
pub(crate) fn token_suffix(token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => format!("?token={}", encode_query_value(token)),
        _ => String::new(),
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub(crate) fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}
