//! End-to-end smoke tests for the full relayhubd stack.
//!
//! Most tests wire the real relay service over virtual GPIO lines into the real
//! axum router and drive it via `tower::ServiceExt::oneshot`. The last test
//! binds a loopback TCP port to exercise the shutdown hook together with
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use relayhub_adapter_http_axum::router;
use relayhub_adapter_http_axum::shutdown::ShutdownTrigger;
use relayhub_adapter_http_axum::state::AppState;
use relayhub_adapter_virtual::VirtualGpio;
use relayhub_app::services::relay_service::RelayService;
use relayhub_domain::access_token::AccessToken;
use relayhub_domain::pin::{PinId, RelaySet};
use relayhub_domain::polarity::Polarity;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

const TOKEN: &str = "abc";

fn state(polarity: Polarity) -> AppState<VirtualGpio> {
    let relays: RelaySet = "17,27,22,23".parse().unwrap();
    let gpio = VirtualGpio::new(&relays, polarity);
    AppState::new(
        RelayService::new(gpio, relays, polarity),
        AccessToken::new(TOKEN),
    )
}

/// Build a fully-wired router over virtual GPIO lines.
fn app() -> axum::Router {
    router::build(state(Polarity::ActiveHigh))
}

fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("X-Access-Token", token);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    String::from_utf8(resp.into_body().collect().await.unwrap().to_bytes().to_vec()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_text(resp).await).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .oneshot(request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "OK");
}

// ---------------------------------------------------------------------------
// JSON API
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_documented_relay_scenario() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/relay/27/on", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, r#"{"ok":true,"pin":27,"state":true}"#);

    let resp = app
        .clone()
        .oneshot(request("GET", "/api/relays", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_text(resp).await,
        r#"{"pins":[17,27,22,23],"state":{"17":false,"27":true,"22":false,"23":false}}"#
    );

    let resp = app
        .oneshot(request("POST", "/api/relay/99/on", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn should_toggle_back_to_starting_state() {
    let app = app();

    for expected in [true, false] {
        let resp = app
            .clone()
            .oneshot(request("POST", "/api/relay/22/toggle", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["state"], expected);
    }
}

#[tokio::test]
async fn should_drive_inverted_line_when_active_low() {
    let state = state(Polarity::ActiveLow);
    let app = router::build(state.clone());
    assert_eq!(state.relay_service.gpio().level(PinId::new(17)), Some(true));

    let resp = app
        .oneshot(request("POST", "/api/relay/17/on", Some(TOKEN)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["state"], true);
    assert_eq!(state.relay_service.gpio().level(PinId::new(17)), Some(false));
}

#[tokio::test]
async fn should_reject_requests_with_wrong_token() {
    let state = state(Polarity::ActiveHigh);
    let app = router::build(state.clone());

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/relay/27/on", Some("nope")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .oneshot(request("GET", "/api/relays?token=nope", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(state.relay_service.gpio().level(PinId::new(27)), Some(false));
}

#[tokio::test]
async fn should_prefer_header_token_over_query_parameter() {
    let resp = app()
        .oneshot(request("GET", "/api/relays?token=abc", Some("nope")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_show_api_change_on_dashboard() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(request("POST", "/api/relay/23/on", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(request("GET", "/?token=abc", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("<article class=\"card on\" data-pin=\"23\">"));
    assert!(body.contains("<article class=\"card off\" data-pin=\"17\">"));
}

#[tokio::test]
async fn should_apply_form_submission_and_redirect_home() {
    let app = app();

    let resp = app
        .clone()
        .oneshot(request("POST", "/relays/27/toggle?token=abc", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/?token=abc");

    let resp = app
        .oneshot(request("GET", "/api/relays", Some(TOKEN)))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["state"]["27"], true);
}

// ---------------------------------------------------------------------------
// Shutdown hook over a real socket
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_stop_server_when_shutdown_hook_called_from_loopback() {
    let relays: RelaySet = "17".parse().unwrap();
    let shutdown = ShutdownTrigger::default();
    let state = AppState::from_arcs(
        Arc::new(RelayService::new(
            VirtualGpio::new(&relays, Polarity::ActiveHigh),
            relays,
            Polarity::ActiveHigh,
        )),
        Arc::new(AccessToken::new(TOKEN)),
        shutdown.clone(),
    );
    let app = router::build(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await
    });

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"POST /_shutdown HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 200"));
    assert!(raw.ends_with("Shutting down..."));

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server should stop after the shutdown hook");
    assert!(result.unwrap().is_ok());
}
