//! Shutdown hook: `POST /_shutdown`.
//!
//! Not guarded by the access token, so it only honours requests whose peer
//! address is loopback. Requires the server to be run with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tokio::sync::Notify;

use relayhub_app::ports::GpioAdapter;

use crate::state::AppState;

/// Cloneable handle used to request a graceful shutdown.
#[derive(Clone, Debug, Default)]
pub struct ShutdownTrigger(Arc<Notify>);

impl ShutdownTrigger {
    /// Request shutdown. A request made before anyone waits is not lost.
    pub fn trigger(&self) {
        self.0.notify_one();
    }

    /// Resolve once [`trigger`](Self::trigger) has been called.
    pub async fn wait(&self) {
        self.0.notified().await;
    }
}

/// Possible responses from the shutdown hook.
pub enum ShutdownResponse {
    Accepted,
    Forbidden,
}

impl IntoResponse for ShutdownResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted => "Shutting down...".into_response(),
            Self::Forbidden => StatusCode::FORBIDDEN.into_response(),
        }
    }
}

/// `POST /_shutdown`
pub async fn hook<G>(State(state): State<AppState<G>>, request: Request) -> ShutdownResponse
where
    G: GpioAdapter + 'static,
{
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    match peer {
        Some(addr) if addr.ip().is_loopback() => {
            tracing::info!(%addr, "shutdown requested");
            state.shutdown.trigger();
            ShutdownResponse::Accepted
        }
        other => {
            tracing::warn!(peer = ?other, "rejected shutdown request from non-loopback peer");
            ShutdownResponse::Forbidden
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn should_resolve_wait_after_trigger() {
        let trigger = ShutdownTrigger::default();
        trigger.clone().trigger();

        tokio::time::timeout(Duration::from_secs(1), trigger.wait())
            .await
            .expect("stored permit should release the waiter");
    }
}
