//! # relayhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **driven port** that GPIO adapters implement:
//!   - `GpioAdapter`: activate / deactivate a relay line
//! - Define the **driving use-case**:
//!   - `RelayService`: list relay states, apply `on` / `off` / `toggle`
//! - Own the authoritative in-memory relay state map
//!
//! ## Dependency rule
//! Depends on `relayhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
