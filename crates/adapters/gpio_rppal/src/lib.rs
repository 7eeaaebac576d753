//! # relayhub-adapter-gpio-rppal
//!
//! GPIO adapter for the Raspberry Pi built on [rppal](https://docs.rs/rppal).
//!
//! ## Responsibilities
//! - Open the GPIO peripheral once at startup ([`RppalGpio::probe`])
//! - Claim every configured relay pin as an output, starting in the line
//!   level that corresponds to a released relay for the configured polarity
//! - Drive lines high/low on `activate` / `deactivate`
//!
//! Pins that cannot be claimed are skipped with a warning; the relay service
//! then treats them as memory-only. Claimed lines are returned to their
//! previous mode when the adapter is dropped.
//!
//! ## Dependency rule
//!
//! Depends on `relayhub-app` (port traits) and `relayhub-domain` only.

mod error;

pub use error::RppalError;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use relayhub_app::ports::GpioAdapter;
use relayhub_domain::pin::{PinId, RelaySet};
use relayhub_domain::polarity::{LineDrive, Polarity};
use relayhub_domain::relay::RelayState;
use rppal::gpio::{Gpio, OutputPin};

/// Relay lines claimed through rppal.
pub struct RppalGpio {
    lines: HashMap<PinId, Mutex<OutputPin>>,
}

impl RppalGpio {
    /// Open the GPIO peripheral and claim every relay pin as an output.
    ///
    /// # Errors
    ///
    /// Returns [`RppalError::Init`] when the peripheral cannot be opened.
    /// Individual pins that fail to be claimed are skipped, not reported.
    pub fn probe(relays: &RelaySet, polarity: Polarity) -> Result<Self, RppalError> {
        let gpio = Gpio::new().map_err(RppalError::Init)?;
        let released = polarity.drive_for(RelayState::Off);

        let mut lines = HashMap::new();
        for pin in relays.iter() {
            match gpio.get(pin.bcm()) {
                Ok(raw) => {
                    let mut output = match released {
                        LineDrive::Activate => raw.into_output_high(),
                        LineDrive::Deactivate => raw.into_output_low(),
                    };
                    output.set_reset_on_drop(true);
                    lines.insert(pin, Mutex::new(output));
                    tracing::debug!(%pin, "claimed relay line");
                }
                Err(err) => {
                    tracing::warn!(%pin, error = %err, "cannot claim relay line, falling back to memory only");
                }
            }
        }

        tracing::info!(
            claimed = lines.len(),
            configured = relays.len(),
            %polarity,
            "rppal GPIO ready"
        );
        Ok(Self { lines })
    }

    fn line(&self, pin: PinId) -> Result<MutexGuard<'_, OutputPin>, RppalError> {
        self.lines
            .get(&pin)
            .map(|line| line.lock().unwrap_or_else(PoisonError::into_inner))
            .ok_or(RppalError::Unclaimed(pin))
    }
}

impl GpioAdapter for RppalGpio {
    type Error = RppalError;

    fn is_available(&self, pin: PinId) -> bool {
        self.lines.contains_key(&pin)
    }

    fn activate(&self, pin: PinId) -> Result<(), Self::Error> {
        self.line(pin)?.set_high();
        Ok(())
    }

    fn deactivate(&self, pin: PinId) -> Result<(), Self::Error> {
        self.line(pin)?.set_low();
        Ok(())
    }
}

impl std::fmt::Debug for RppalGpio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pins: Vec<PinId> = self.lines.keys().copied().collect();
        pins.sort_unstable();
        f.debug_struct("RppalGpio").field("lines", &pins).finish()
    }
}
