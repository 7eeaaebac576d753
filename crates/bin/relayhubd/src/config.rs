//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `relayhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::str::FromStr;

use serde::Deserialize;

use relayhub_domain::error::RelaySetError;
use relayhub_domain::pin::{PinId, RelaySet};
use relayhub_domain::polarity::Polarity;

/// Session secret used when none is configured.
pub const DEFAULT_SESSION_SECRET: &str = "change-me";

const DEFAULT_RELAYS: [u8; 4] = [17, 27, 22, 23];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Authentication settings.
    pub auth: AuthConfig,
    /// Relay and GPIO settings.
    pub relays: RelaysConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Authentication configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret; empty disables authentication.
    pub access_token: String,
    /// Session/signing secret for browser sessions. Not used by the API.
    pub session_secret: String,
}

/// Relay configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RelaysConfig {
    /// BCM pins driving relays, in display order.
    pub pins: RelaySet,
    /// Whether relays engage when their line is driven low.
    pub active_low: bool,
    /// Which GPIO backend to use.
    pub backend: GpioBackend,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// GPIO backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpioBackend {
    /// Probe the hardware through rppal, fall back to virtual lines.
    #[default]
    #[serde(alias = "rppal")]
    Auto,
    /// Never touch hardware.
    Virtual,
}

impl FromStr for GpioBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "rppal" => Ok(Self::Auto),
            "virtual" => Ok(Self::Virtual),
            other => Err(ConfigError::Validation(format!(
                "unknown GPIO backend `{other}`, expected auto or virtual"
            ))),
        }
    }
}

impl Config {
    /// Load configuration from `relayhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if an
    /// override or the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("relayhub.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("ACCESS_TOKEN") {
            self.auth.access_token = val;
        }
        if let Some(val) = var("SESSION_SECRET") {
            self.auth.session_secret = val;
        }
        if let Some(val) = var("BIND_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("BIND_PORT") {
            self.server.port = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("invalid BIND_PORT `{val}`")))?;
        }
        if let Some(val) = var("RELAYS") {
            self.relays.pins = val.parse()?;
        }
        if let Some(val) = var("RELAY_ACTIVE_LOW") {
            self.relays.active_low = parse_flag(&val).ok_or_else(|| {
                ConfigError::Validation(format!("invalid RELAY_ACTIVE_LOW `{val}`"))
            })?;
        }
        if let Some(val) = var("RELAYHUB_GPIO_BACKEND") {
            self.relays.backend = val.parse()?;
        }
        if let Some(val) = var("RELAYHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Relay wiring polarity.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        Polarity::from_active_low(self.relays.active_low)
    }

    /// Whether the session secret was left at its default.
    #[must_use]
    pub fn uses_default_session_secret(&self) -> bool {
        self.auth.session_secret == DEFAULT_SESSION_SECRET
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5003,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
        }
    }
}

impl Default for RelaysConfig {
    fn default() -> Self {
        Self {
            pins: RelaySet::new(DEFAULT_RELAYS.map(PinId::new)).unwrap_or_default(),
            active_low: false,
            backend: GpioBackend::Auto,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "relayhubd=info,relayhub=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Malformed relay list.
    #[error("invalid RELAYS")]
    Relays(#[from] RelaySetError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
