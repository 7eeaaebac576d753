//! GPIO port: the capability to drive relay lines.
//!
//! Implementations live in adapter crates (`gpio_rppal` for real hardware,
//! `virtual` for an in-memory stand-in). The binary picks one at startup.

use relayhub_domain::pin::PinId;
use relayhub_domain::polarity::LineDrive;

/// Drives the output line of a relay.
///
/// Writes are synchronous and expected to complete quickly. Callers serialise
/// access per pin, so implementations only need to be `Sync`.
pub trait GpioAdapter: Send + Sync {
    /// Error raised by a failed write.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether this adapter controls `pin`.
    ///
    /// Pins that could not be claimed at startup report `false`; the service
    /// then records state changes in memory only.
    fn is_available(&self, pin: PinId) -> bool;

    /// Assert the line (logical high).
    ///
    /// # Errors
    ///
    /// Returns the adapter's error when the write fails.
    fn activate(&self, pin: PinId) -> Result<(), Self::Error>;

    /// De-assert the line (logical low).
    ///
    /// # Errors
    ///
    /// Returns the adapter's error when the write fails.
    fn deactivate(&self, pin: PinId) -> Result<(), Self::Error>;

    /// Dispatch to [`activate`](Self::activate) or [`deactivate`](Self::deactivate).
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying write.
    fn drive(&self, pin: PinId, drive: LineDrive) -> Result<(), Self::Error> {
        match drive {
            LineDrive::Activate => self.activate(pin),
            LineDrive::Deactivate => self.deactivate(pin),
        }
    }
}

impl<G: GpioAdapter + ?Sized> GpioAdapter for std::sync::Arc<G> {
    type Error = G::Error;

    fn is_available(&self, pin: PinId) -> bool {
        (**self).is_available(pin)
    }

    fn activate(&self, pin: PinId) -> Result<(), Self::Error> {
        (**self).activate(pin)
    }

    fn deactivate(&self, pin: PinId) -> Result<(), Self::Error> {
        (**self).deactivate(pin)
    }
}
