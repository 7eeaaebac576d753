//! Pin identifiers and the configured relay set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, RelaySetError};

/// BCM GPIO number of a relay line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(u8);

impl PinId {
    /// Wrap a raw BCM number.
    #[must_use]
    pub const fn new(bcm: u8) -> Self {
        Self(bcm)
    }

    /// The raw BCM number.
    #[must_use]
    pub const fn bcm(self) -> u8 {
        self.0
    }
}

impl From<u8> for PinId {
    fn from(bcm: u8) -> Self {
        Self(bcm)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Accepts plain decimal digits only: no sign, no surrounding whitespace.
impl FromStr for PinId {
    type Err = RelaySetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(RelaySetError::InvalidPin(s.to_string()));
        }
        s.parse()
            .map(Self)
            .map_err(|_| RelaySetError::InvalidPin(s.to_string()))
    }
}

/// Ordered, duplicate-free list of relay pins, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RelaySet(Vec<PinId>);

impl RelaySet {
    /// Build a relay set, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`RelaySetError::DuplicatePin`] if a pin appears twice.
    pub fn new(pins: impl IntoIterator<Item = PinId>) -> Result<Self, RelaySetError> {
        let mut ordered: Vec<PinId> = Vec::new();
        for pin in pins {
            if ordered.contains(&pin) {
                return Err(RelaySetError::DuplicatePin(pin));
            }
            ordered.push(pin);
        }
        Ok(Self(ordered))
    }

    /// Whether `pin` is one of the configured relays.
    #[must_use]
    pub fn contains(&self, pin: PinId) -> bool {
        self.0.contains(&pin)
    }

    /// Resolve a raw path segment (e.g. `"27"`) to a configured pin.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidTarget`] when the text is not a pin
    /// number or names a pin outside the set.
    pub fn resolve(&self, raw: &str) -> Result<PinId, RelayError> {
        raw.parse::<PinId>()
            .ok()
            .filter(|pin| self.contains(*pin))
            .ok_or_else(|| RelayError::InvalidTarget(raw.to_string()))
    }

    /// Pins in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = PinId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PinId] {
        &self.0
    }
}

/// Parses a comma-separated list such as `"17,27,22,23"`. Blank entries are skipped.
impl FromStr for RelaySet {
    type Err = RelaySetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pins = s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::parse::<PinId>)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(pins)
    }
}

impl<'de> Deserialize<'de> for RelaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pins = Vec::<PinId>::deserialize(deserializer)?;
        Self::new(pins).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_set() -> RelaySet {
        "17,27,22,23".parse().unwrap()
    }

    #[test]
    fn should_preserve_configuration_order() {
        let set = default_set();
        let pins: Vec<u8> = set.iter().map(PinId::bcm).collect();
        assert_eq!(pins, vec![17, 27, 22, 23]);
    }

    #[test]
    fn should_skip_blank_entries_and_whitespace() {
        let set: RelaySet = " 17, ,27,".parse().unwrap();
        assert_eq!(set.as_slice(), &[PinId::new(17), PinId::new(27)]);
    }

    #[test]
    fn should_parse_empty_list_as_empty_set() {
        let set: RelaySet = "".parse().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn should_reject_duplicate_pins() {
        let result: Result<RelaySet, _> = "17,27,17".parse();
        assert_eq!(result, Err(RelaySetError::DuplicatePin(PinId::new(17))));
    }

    #[test]
    fn should_reject_non_numeric_entry() {
        let result: Result<RelaySet, _> = "17,abc".parse();
        assert_eq!(result, Err(RelaySetError::InvalidPin("abc".to_string())));
    }

    #[test]
    fn should_reject_out_of_range_pin() {
        let result: Result<RelaySet, _> = "300".parse();
        assert!(matches!(result, Err(RelaySetError::InvalidPin(_))));
    }

    #[test]
    fn should_resolve_configured_pin() {
        let set = default_set();
        assert_eq!(set.resolve("27").unwrap(), PinId::new(27));
    }

    #[test]
    fn should_return_invalid_target_for_unknown_pin() {
        let set = default_set();
        let err = set.resolve("99").unwrap_err();
        assert!(matches!(err, RelayError::InvalidTarget(raw) if raw == "99"));
    }

    #[test]
    fn should_return_invalid_target_for_non_numeric_segment() {
        let set = default_set();
        assert!(matches!(
            set.resolve("relay"),
            Err(RelayError::InvalidTarget(_))
        ));
    }

    #[test]
    fn should_return_invalid_target_for_signed_or_padded_segment() {
        let set = default_set();
        for raw in ["+27", " 27", "27 ", "-0", "", "0x1b"] {
            assert!(
                matches!(set.resolve(raw), Err(RelayError::InvalidTarget(_))),
                "{raw:?} should not resolve"
            );
        }
    }

    #[test]
    fn should_reject_signed_entry_in_list() {
        let result: Result<RelaySet, _> = "17,+27".parse();
        assert_eq!(result, Err(RelaySetError::InvalidPin("+27".to_string())));
    }

    #[test]
    fn should_serialize_as_plain_array() {
        let json = serde_json::to_string(&default_set()).unwrap();
        assert_eq!(json, "[17,27,22,23]");
    }

    #[test]
    fn should_reject_duplicates_when_deserializing() {
        let result: Result<RelaySet, _> = serde_json::from_str("[5,5]");
        assert!(result.is_err());
    }
}
