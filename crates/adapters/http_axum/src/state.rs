//! Shared application state for axum handlers.

use std::sync::Arc;

use relayhub_app::ports::GpioAdapter;
use relayhub_app::services::relay_service::RelayService;
use relayhub_domain::access_token::AccessToken;

use crate::shutdown::ShutdownTrigger;

/// Application state shared across all axum handlers.
///
/// Generic over the GPIO adapter to avoid dynamic dispatch.
/// `Clone` is implemented manually so the adapter itself does not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<G> {
    /// Relay use-case service owning the state map.
    pub relay_service: Arc<RelayService<G>>,
    /// Shared secret checked by the auth middleware.
    pub access_token: Arc<AccessToken>,
    /// Fired by the shutdown hook.
    pub shutdown: ShutdownTrigger,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            relay_service: Arc::clone(&self.relay_service),
            access_token: Arc::clone(&self.access_token),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<G> AppState<G>
where
    G: GpioAdapter + 'static,
{
    /// Create a new application state.
    pub fn new(relay_service: RelayService<G>, access_token: AccessToken) -> Self {
        Self::from_arcs(
            Arc::new(relay_service),
            Arc::new(access_token),
            ShutdownTrigger::default(),
        )
    }

    /// Create a new application state from pre-wrapped parts.
    ///
    /// Use this when the service or the shutdown trigger must be shared with
    /// the composition root before constructing the HTTP state.
    pub fn from_arcs(
        relay_service: Arc<RelayService<G>>,
        access_token: Arc<AccessToken>,
        shutdown: ShutdownTrigger,
    ) -> Self {
        Self {
            relay_service,
            access_token,
            shutdown,
        }
    }
}
