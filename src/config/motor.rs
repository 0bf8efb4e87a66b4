//! Motor configuration from TOML.

use serde::{Deserialize, Serialize};

use super::limits::LimitPolicy;
use super::timing::{StepTiming, DEFAULT_STEPS_PER_REVOLUTION};
use super::units::{ActiveLevel, Rpm};

/// Backlash compensation pulses issued after every move.
pub const DEFAULT_SETTLING_PULSES: u8 = 2;

/// Settling delays around enable-pin writes, in microseconds.
///
/// Driver boards need a short time before and after the enable line
/// changes; the numbers depend on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnableSettle {
    /// Delay before the pin write.
    #[serde(default = "default_pre_us")]
    pub pre_us: u32,
    /// Delay after the pin write.
    #[serde(default = "default_post_us")]
    pub post_us: u32,
}

fn default_pre_us() -> u32 {
    100
}

fn default_post_us() -> u32 {
    50
}

impl Default for EnableSettle {
    fn default() -> Self {
        Self {
            pre_us: default_pre_us(),
            post_us: default_post_us(),
        }
    }
}

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Output shaft speed.
    pub rpm: Rpm,

    /// Base steps per revolution (typically 200 for 1.8° motors).
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u16,

    /// Invert direction pin logic (forward = low).
    #[serde(default)]
    pub invert_direction: bool,

    /// Level of the enable pin that powers the coils.
    #[serde(default = "default_enable_level")]
    pub enable_active_level: ActiveLevel,

    /// Settling delays around enable/disable.
    #[serde(default)]
    pub enable_settle: EnableSettle,

    /// Backward pulses issued after every move.
    #[serde(default = "default_settling_pulses")]
    pub settling_pulses: u8,

    /// Optional policy for raw moves leaving `[0, max_steps]`.
    #[serde(default)]
    pub limit_policy: Option<LimitPolicy>,
}

fn default_steps_per_revolution() -> u16 {
    DEFAULT_STEPS_PER_REVOLUTION
}

fn default_enable_level() -> ActiveLevel {
    ActiveLevel::Low
}

fn default_settling_pulses() -> u8 {
    DEFAULT_SETTLING_PULSES
}

impl MotorConfig {
    /// Configuration with defaults for everything but the speed.
    pub fn with_rpm(rpm: Rpm) -> Self {
        Self {
            rpm,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            invert_direction: false,
            enable_active_level: default_enable_level(),
            enable_settle: EnableSettle::default(),
            settling_pulses: DEFAULT_SETTLING_PULSES,
            limit_policy: None,
        }
    }

    /// Step timing derived from this configuration.
    pub fn timing(&self) -> StepTiming {
        StepTiming::from_rpm(self.rpm, self.steps_per_revolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotorConfig::with_rpm(Rpm(10.0));

        assert_eq!(config.steps_per_revolution, 200);
        assert_eq!(config.enable_active_level, ActiveLevel::Low);
        assert_eq!(config.enable_settle.pre_us, 100);
        assert_eq!(config.enable_settle.post_us, 50);
        assert_eq!(config.settling_pulses, 2);
        assert!(config.limit_policy.is_none());
        assert_eq!(config.timing().step_delay_micros, 15000);
    }
}
