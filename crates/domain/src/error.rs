//! Error types shared across the workspace.
//!
//! Each layer defines its own typed errors; adapters convert theirs into
//! [`RelayError::Actuation`] when a hardware write fails.

use crate::pin::PinId;

/// Boxed error raised by a GPIO adapter.
pub type ActuationSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by relay operations.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The requested pin is not part of the configured relay set.
    #[error("pin `{0}` is not a configured relay")]
    InvalidTarget(String),

    /// The requested action is not one of `on`, `off`, `toggle`.
    #[error("invalid action `{0}`, expected one of on, off, toggle")]
    InvalidAction(String),

    /// The GPIO adapter failed to drive the pin.
    #[error("failed to drive relay on pin {pin}: {source}")]
    Actuation {
        pin: PinId,
        #[source]
        source: ActuationSource,
    },
}

impl RelayError {
    /// Wrap an adapter error raised while driving `pin`.
    pub fn actuation(pin: PinId, source: impl Into<ActuationSource>) -> Self {
        Self::Actuation {
            pin,
            source: source.into(),
        }
    }
}

/// Errors raised while building a [`RelaySet`](crate::pin::RelaySet).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RelaySetError {
    /// An entry could not be parsed as a BCM pin number.
    #[error("invalid pin number `{0}`")]
    InvalidPin(String),

    /// The same pin was listed twice.
    #[error("pin {0} is listed more than once")]
    DuplicatePin(PinId),
}
