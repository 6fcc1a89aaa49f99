use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default announcement, with the `[player]` token substituted at dispatch.
pub const DEFAULT_MESSAGE: &str = "Drink up, [player]! Cola can't hurt you on this server.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("unknown message channel {value:?}, expected \"Broadcast\" or \"Hint\"")]
    UnknownChannel { value: String },
    #[error("message_content is blank while messaging is enabled")]
    BlankMessage,
}

/// Plugin configuration, immutable once validated. `message_type` stays raw
/// text because the config file carries free text; `MessageChannel` is the
/// parsed form, checked again defensively at dispatch time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enabled: bool,
    pub log_enabled: bool,
    pub debug_log_enabled: bool,
    pub message_enabled: bool,
    pub message_type: String,
    pub message_content: String,
    pub message_duration: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            log_enabled: true,
            debug_log_enabled: false,
            message_enabled: true,
            message_type: "Broadcast".to_string(),
            message_content: DEFAULT_MESSAGE.to_string(),
            message_duration: 3,
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&data)?;
        Ok(settings)
    }

    /// Read and validate in one step; the lifecycle entry point.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = Self::from_path(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// The message fields only matter while messaging is enabled; a muted
    /// config is valid whatever they hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.message_enabled {
            return Ok(());
        }
        self.message_type.parse::<MessageChannel>()?;
        if self.message_content.trim().is_empty() {
            return Err(ConfigError::BlankMessage);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageChannel {
    Broadcast,
    Hint,
}

impl FromStr for MessageChannel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Broadcast" => Ok(Self::Broadcast),
            "Hint" => Ok(Self::Hint),
            other => Err(ConfigError::UnknownChannel {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MessageChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast => f.write_str("Broadcast"),
            Self::Hint => f.write_str("Hint"),
        }
    }
}
