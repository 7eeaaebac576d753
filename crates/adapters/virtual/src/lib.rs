//! # relayhub-adapter-virtual
//!
//! Virtual GPIO adapter that keeps relay line levels in memory.
//!
//! Used as the fallback backend when the hardware probe fails, and as a
//! deterministic adapter in tests. Lines can be marked faulty so that
//! actuation failures can be exercised end to end.
//!
//! ## Dependency rule
//!
//! Depends on `relayhub-app` (port traits) and `relayhub-domain` only.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use relayhub_app::ports::GpioAdapter;
use relayhub_domain::pin::{PinId, RelaySet};
use relayhub_domain::polarity::{LineDrive, Polarity};
use relayhub_domain::relay::RelayState;

/// Errors raised by the virtual adapter.
#[derive(Debug, thiserror::Error)]
pub enum VirtualGpioError {
    /// The pin was never registered with this adapter.
    #[error("pin {0} is not registered")]
    UnknownPin(PinId),

    /// A fault was injected on the pin with [`VirtualGpio::inject_fault`].
    #[error("injected fault on pin {0}")]
    InjectedFault(PinId),
}

/// In-memory GPIO lines. `true` means the line is asserted.
#[derive(Debug, Default)]
pub struct VirtualGpio {
    lines: Mutex<HashMap<PinId, bool>>,
    faults: Mutex<HashSet<PinId>>,
}

impl VirtualGpio {
    /// Register every pin of `relays` at the level that releases the relay
    /// for `polarity`, matching the `OFF` state recorded at startup.
    #[must_use]
    pub fn new(relays: &RelaySet, polarity: Polarity) -> Self {
        let released = polarity.drive_for(RelayState::Off) == LineDrive::Activate;
        Self {
            lines: Mutex::new(relays.iter().map(|pin| (pin, released)).collect()),
            faults: Mutex::default(),
        }
    }

    /// Current line level, or `None` if the pin is not registered.
    #[must_use]
    pub fn level(&self, pin: PinId) -> Option<bool> {
        lock(&self.lines).get(&pin).copied()
    }

    /// Make every subsequent write to `pin` fail.
    pub fn inject_fault(&self, pin: PinId) {
        lock(&self.faults).insert(pin);
    }

    /// Remove a fault previously injected on `pin`.
    pub fn clear_fault(&self, pin: PinId) {
        lock(&self.faults).remove(&pin);
    }

    fn write(&self, pin: PinId, level: bool) -> Result<(), VirtualGpioError> {
        if lock(&self.faults).contains(&pin) {
            return Err(VirtualGpioError::InjectedFault(pin));
        }
        let mut lines = lock(&self.lines);
        let line = lines
            .get_mut(&pin)
            .ok_or(VirtualGpioError::UnknownPin(pin))?;
        *line = level;
        tracing::trace!(%pin, level, "virtual line written");
        Ok(())
    }
}

impl GpioAdapter for VirtualGpio {
    type Error = VirtualGpioError;

    fn is_available(&self, pin: PinId) -> bool {
        lock(&self.lines).contains_key(&pin)
    }

    fn activate(&self, pin: PinId) -> Result<(), Self::Error> {
        self.write(pin, true)
    }

    fn deactivate(&self, pin: PinId) -> Result<(), Self::Error> {
        self.write(pin, false)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
