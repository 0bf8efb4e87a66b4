//! System configuration - root configuration structure.

use serde::{Deserialize, Serialize};

use super::motor::MotorConfig;
use super::units::ActiveLevel;

/// Debounce window of the jog buttons, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Jog button wiring and debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Time a raw level must hold before it is reported.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Pin level that means "pressed".
    #[serde(default = "default_button_level")]
    pub active_level: ActiveLevel,
}

fn default_debounce_ms() -> u32 {
    DEFAULT_DEBOUNCE_MS
}

fn default_button_level() -> ActiveLevel {
    ActiveLevel::High
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            active_level: default_button_level(),
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Motor wiring and speed.
    pub motor: MotorConfig,

    /// Jog buttons.
    #[serde(default)]
    pub buttons: ButtonConfig,
}
