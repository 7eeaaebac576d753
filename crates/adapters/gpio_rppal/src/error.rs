//! rppal adapter error types.

use relayhub_domain::pin::PinId;

/// Errors specific to the rppal adapter.
#[derive(Debug, thiserror::Error)]
pub enum RppalError {
    /// The GPIO peripheral could not be opened (not a Raspberry Pi, missing
    /// `/dev/gpiomem`, insufficient permissions, …).
    #[error("GPIO peripheral unavailable")]
    Init(#[source] rppal::gpio::Error),

    /// The pin was not claimed during the probe.
    #[error("pin {0} is not claimed by the GPIO adapter")]
    Unclaimed(PinId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unclaimed_error() {
        let err = RppalError::Unclaimed(PinId::new(5));
        assert_eq!(err.to_string(), "pin 5 is not claimed by the GPIO adapter");
    }

    #[test]
    fn should_keep_rppal_error_as_source() {
        let err = RppalError::Init(rppal::gpio::Error::PinNotAvailable(4));
        assert_eq!(err.to_string(), "GPIO peripheral unavailable");
        assert!(std::error::Error::source(&err).is_some());
    }
}
