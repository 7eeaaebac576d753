//! Relay service: inspect and change relay states.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use relayhub_domain::error::RelayError;
use relayhub_domain::pin::{PinId, RelaySet};
use relayhub_domain::polarity::Polarity;
use relayhub_domain::relay::{RelayAction, RelayState};

use crate::ports::GpioAdapter;

/// Outcome of a successful relay command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayChange {
    pub pin: PinId,
    pub state: RelayState,
}

/// Application service owning the relay state map.
///
/// Every configured pin has its own lock. The lock is held across the read of
/// the current state, the GPIO write and the map update, so concurrent
/// `toggle` calls on one pin never lose an update.
pub struct RelayService<G> {
    gpio: G,
    polarity: Polarity,
    relays: RelaySet,
    states: HashMap<PinId, Mutex<RelayState>>,
}

impl<G: GpioAdapter> RelayService<G> {
    /// Create a service with every relay recorded as `OFF`.
    ///
    /// The hardware is not touched here. Adapters claim their lines in the
    /// released level, and nothing is restored from a previous run.
    pub fn new(gpio: G, relays: RelaySet, polarity: Polarity) -> Self {
        let states = relays
            .iter()
            .map(|pin| (pin, Mutex::new(RelayState::Off)))
            .collect();
        Self {
            gpio,
            polarity,
            relays,
            states,
        }
    }

    /// The configured relay set, in configuration order.
    pub fn relays(&self) -> &RelaySet {
        &self.relays
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Access the underlying adapter.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    /// Configured pins the adapter cannot drive.
    pub fn unavailable_pins(&self) -> Vec<PinId> {
        self.relays
            .iter()
            .filter(|pin| !self.gpio.is_available(*pin))
            .collect()
    }

    /// Recorded state of every relay, in configuration order.
    pub fn list(&self) -> Vec<(PinId, RelayState)> {
        self.relays
            .iter()
            .filter_map(|pin| self.states.get(&pin).map(|slot| (pin, *lock(slot))))
            .collect()
    }

    /// Recorded state of a single relay, or `None` if it is not configured.
    pub fn state(&self, pin: PinId) -> Option<RelayState> {
        self.states.get(&pin).map(|slot| *lock(slot))
    }

    /// Validate raw request parameters and apply the command.
    ///
    /// The pin is checked before the action, so a request naming both an
    /// unknown pin and an unknown action reports the pin.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidTarget`], [`RelayError::InvalidAction`]
    /// or [`RelayError::Actuation`].
    pub fn execute(&self, raw_pin: &str, raw_action: &str) -> Result<RelayChange, RelayError> {
        let pin = self.relays.resolve(raw_pin)?;
        let action: RelayAction = raw_action.parse()?;
        self.apply(pin, action)
    }

    /// Apply `action` to `pin`, driving the hardware when it is available.
    ///
    /// Recorded state is only updated after the write succeeds. Pins the
    /// adapter does not control are updated in memory only.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidTarget`] when `pin` is not configured,
    /// or [`RelayError::Actuation`] when the adapter write fails.
    pub fn apply(&self, pin: PinId, action: RelayAction) -> Result<RelayChange, RelayError> {
        let slot = self
            .states
            .get(&pin)
            .ok_or_else(|| RelayError::InvalidTarget(pin.to_string()))?;

        let mut current = lock(slot);
        let desired = action.apply(*current);

        if self.gpio.is_available(pin) {
            let drive = self.polarity.drive_for(desired);
            self.gpio.drive(pin, drive).map_err(|err| {
                tracing::error!(%pin, %action, error = %err, "relay actuation failed");
                RelayError::actuation(pin, err)
            })?;
        } else {
            tracing::debug!(%pin, %action, "gpio unavailable, recording state in memory only");
        }

        *current = desired;
        tracing::info!(%pin, %action, state = %desired, "relay updated");

        Ok(RelayChange {
            pin,
            state: desired,
        })
    }
}

fn lock(slot: &Mutex<RelayState>) -> MutexGuard<'_, RelayState> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
