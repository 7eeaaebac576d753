//! Shared-secret access token.

use std::fmt;

use subtle::ConstantTimeEq;

/// The secret every request must present. An empty token disables
/// authentication (open-access mode).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Whether authentication is disabled.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.0.is_empty()
    }

    /// Check a supplied token. Comparison is byte-exact and constant-time,
    /// so tokens that are not valid UTF-8 are simply rejected.
    ///
    /// Always `true` in open-access mode; otherwise a missing token fails.
    #[must_use]
    pub fn verify(&self, supplied: Option<&[u8]>) -> bool {
        if self.is_open() {
            return true;
        }
        supplied.is_some_and(|candidate| bool::from(candidate.ct_eq(self.0.as_bytes())))
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open() {
            f.write_str("AccessToken(<open>)")
        } else {
            f.write_str("AccessToken(<redacted>)")
        }
    }
}
