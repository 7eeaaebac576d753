//! # relayhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** for programmatic access
//!   (`GET /api/relays`, `POST /api/relay/{pin}/{action}`)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: pure HTML forms + `<meta http-equiv="refresh">`
//!   for live updates
//! - Enforce the shared-secret **access token** on every route except the
//!   health probe and the loopback-only shutdown hook
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Dependency rule
//! Depends on `relayhub-app` (for the port trait and the relay service) and
//! `relayhub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod shutdown;
pub mod state;
