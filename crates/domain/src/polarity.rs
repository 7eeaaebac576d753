//! Relay wiring polarity.
//!
//! Most opto-isolated relay boards close the contact when the input line is
//! pulled low. [`Polarity`] maps the logical relay state onto the line level
//! the GPIO adapter must drive.

use std::fmt;

use crate::relay::RelayState;

/// Whether a relay engages when its line is driven high or low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

/// Line operation the GPIO adapter must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDrive {
    Activate,
    Deactivate,
}

impl Polarity {
    /// Build from the `RELAY_ACTIVE_LOW` style boolean flag.
    #[must_use]
    pub fn from_active_low(active_low: bool) -> Self {
        if active_low {
            Self::ActiveLow
        } else {
            Self::ActiveHigh
        }
    }

    /// Line operation that puts a relay into `state`.
    #[must_use]
    pub fn drive_for(self, state: RelayState) -> LineDrive {
        match (self, state) {
            (Self::ActiveHigh, RelayState::On) | (Self::ActiveLow, RelayState::Off) => {
                LineDrive::Activate
            }
            (Self::ActiveHigh, RelayState::Off) | (Self::ActiveLow, RelayState::On) => {
                LineDrive::Deactivate
            }
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveHigh => f.write_str("active-high"),
            Self::ActiveLow => f.write_str("active-low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_activate_line_for_on_when_active_high() {
        assert_eq!(
            Polarity::ActiveHigh.drive_for(RelayState::On),
            LineDrive::Activate
        );
        assert_eq!(
            Polarity::ActiveHigh.drive_for(RelayState::Off),
            LineDrive::Deactivate
        );
    }

    #[test]
    fn should_invert_line_when_active_low() {
        assert_eq!(
            Polarity::ActiveLow.drive_for(RelayState::On),
            LineDrive::Deactivate
        );
        assert_eq!(
            Polarity::ActiveLow.drive_for(RelayState::Off),
            LineDrive::Activate
        );
    }

    #[test]
    fn should_build_from_active_low_flag() {
        assert_eq!(Polarity::from_active_low(true), Polarity::ActiveLow);
        assert_eq!(Polarity::from_active_low(false), Polarity::ActiveHigh);
    }
}
