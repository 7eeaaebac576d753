//! # relayhubd, the relayhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Select the GPIO backend (rppal or virtual) once, from a hardware probe
//! - Construct the relay service, injecting the GPIO adapter via the port trait
//! - Build the axum router, injecting the service and the access token
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT or the loopback shutdown hook)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;
mod gpio;

use std::net::SocketAddr;
use std::sync::Arc;

use relayhub_adapter_http_axum::shutdown::ShutdownTrigger;
use relayhub_adapter_http_axum::state::AppState;
use relayhub_app::services::relay_service::RelayService;
use relayhub_domain::access_token::AccessToken;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::gpio::Gpio;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let access_token = AccessToken::new(config.auth.access_token.clone());
    if access_token.is_open() {
        tracing::warn!("ACCESS_TOKEN is empty, authentication is disabled");
    }
    if config.uses_default_session_secret() {
        tracing::warn!("SESSION_SECRET is left at its default value");
    }

    // GPIO
    let relays = config.relays.pins.clone();
    let polarity = config.polarity();
    let gpio = Gpio::select(config.relays.backend, &relays, polarity);

    // Services
    let relay_service = RelayService::new(gpio, relays, polarity);
    let memory_only = relay_service.unavailable_pins();
    if !memory_only.is_empty() {
        tracing::warn!(pins = ?memory_only, "relays without GPIO line, state kept in memory only");
    }
    tracing::info!(
        backend = relay_service.gpio().name(),
        relays = ?relay_service.relays(),
        %polarity,
        "relay service ready"
    );

    // HTTP
    let shutdown = ShutdownTrigger::default();
    let state = AppState::from_arcs(
        Arc::new(relay_service),
        Arc::new(access_token),
        shutdown.clone(),
    );
    let app = relayhub_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "relayhubd listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown))
    .await?;

    tracing::info!("relayhubd stopped");
    Ok(())
}

/// Resolve on Ctrl-C, SIGTERM, or a request to the shutdown hook.
async fn shutdown_signal(trigger: ShutdownTrigger) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl-C"),
        () = terminate => tracing::info!("received SIGTERM"),
        () = trigger.wait() => tracing::info!("shutdown hook triggered"),
    }
}
