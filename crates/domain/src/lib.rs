//! # relayhub-domain
//!
//! Pure domain model for the relayhub relay controller.
//!
//! ## Responsibilities
//! - Foundational types: pin identifiers, the configured relay set, error conventions
//! - Define **actions** (`on`, `off`, `toggle`) and the two-valued **relay state**
//! - Define **polarity** (active-high vs active-low wiring)
//! - Define the shared-secret **access token** and its comparison rules
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod access_token;
pub mod error;
pub mod pin;
pub mod polarity;
pub mod relay;
