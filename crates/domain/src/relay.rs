//! Relay state and the actions that change it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::RelayError;

/// Recorded state of a relay. Serialized as a JSON boolean (`true` = on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "bool")]
pub enum RelayState {
    On,
    #[default]
    Off,
}

impl RelayState {
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// The opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

impl From<RelayState> for bool {
    fn from(state: RelayState) -> Self {
        state.is_on()
    }
}

impl fmt::Display for RelayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("ON"),
            Self::Off => f.write_str("OFF"),
        }
    }
}

/// Command applied to a single relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAction {
    On,
    Off,
    Toggle,
}

impl RelayAction {
    /// All actions, in the order the dashboard renders them.
    pub const ALL: [Self; 3] = [Self::On, Self::Off, Self::Toggle];

    /// Compute the desired state given the currently recorded one.
    #[must_use]
    pub fn apply(self, current: RelayState) -> RelayState {
        match self {
            Self::On => RelayState::On,
            Self::Off => RelayState::Off,
            Self::Toggle => current.toggled(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Toggle => "toggle",
        }
    }
}

impl fmt::Display for RelayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matching is exact and case-sensitive, so `"ON"` is rejected.
impl FromStr for RelayAction {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "toggle" => Ok(Self::Toggle),
            other => Err(RelayError::InvalidAction(other.to_string())),
        }
    }
}
