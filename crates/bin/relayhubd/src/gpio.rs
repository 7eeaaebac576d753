//! GPIO backend selection.
//!
//! The backend is chosen once at startup. In `auto` mode the rppal probe is
//! attempted and any failure falls back to virtual lines, so the service
//! keeps running in memory-only mode on machines without GPIO hardware.

use relayhub_adapter_gpio_rppal::{RppalError, RppalGpio};
use relayhub_adapter_virtual::{VirtualGpio, VirtualGpioError};
use relayhub_app::ports::GpioAdapter;
use relayhub_domain::pin::{PinId, RelaySet};
use relayhub_domain::polarity::Polarity;

use crate::config::GpioBackend;

/// The GPIO adapter selected at startup.
#[derive(Debug)]
pub enum Gpio {
    Rppal(RppalGpio),
    Virtual(VirtualGpio),
}

/// Error raised by whichever backend is active.
#[derive(Debug, thiserror::Error)]
pub enum GpioError {
    #[error(transparent)]
    Rppal(#[from] RppalError),
    #[error(transparent)]
    Virtual(#[from] VirtualGpioError),
}

impl Gpio {
    /// Build the adapter for `backend`. Never fails: hardware problems are
    /// logged once and degrade to virtual lines.
    pub fn select(backend: GpioBackend, relays: &RelaySet, polarity: Polarity) -> Self {
        if backend == GpioBackend::Virtual {
            tracing::info!("using virtual GPIO backend");
            return Self::Virtual(VirtualGpio::new(relays, polarity));
        }

        match RppalGpio::probe(relays, polarity) {
            Ok(gpio) => Self::Rppal(gpio),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    source = ?std::error::Error::source(&err),
                    "GPIO not available, relay state will be kept in memory only"
                );
                Self::Virtual(VirtualGpio::new(relays, polarity))
            }
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rppal(_) => "rppal",
            Self::Virtual(_) => "virtual",
        }
    }
}

impl GpioAdapter for Gpio {
    type Error = GpioError;

    fn is_available(&self, pin: PinId) -> bool {
        match self {
            Self::Rppal(gpio) => gpio.is_available(pin),
            Self::Virtual(gpio) => gpio.is_available(pin),
        }
    }

    fn activate(&self, pin: PinId) -> Result<(), Self::Error> {
        match self {
            Self::Rppal(gpio) => Ok(gpio.activate(pin)?),
            Self::Virtual(gpio) => Ok(gpio.activate(pin)?),
        }
    }

    fn deactivate(&self, pin: PinId) -> Result<(), Self::Error> {
        match self {
            Self::Rppal(gpio) => Ok(gpio.deactivate(pin)?),
            Self::Virtual(gpio) => Ok(gpio.deactivate(pin)?),
        }
    }
}
