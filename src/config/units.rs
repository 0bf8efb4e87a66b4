//! Unit types for motor quantities.
//!
//! Provides type-safe representations of travel percentage, shaft speed and
//! signal levels so they are not confused with raw step counts.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, MotorError};

/// Position along the blind's travel, in percent (0 = top, 100 = bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Percent(u8);

impl Percent {
    /// Fully open.
    pub const MIN: Self = Self(0);
    /// Fully closed.
    pub const MAX: Self = Self(100);

    /// Create a new Percent value with validation.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidPercent` if the value is above 100.
    pub fn new(value: u8) -> Result<Self, MotorError> {
        if value <= Self::MAX.0 {
            Ok(Self(value))
        } else {
            Err(MotorError::InvalidPercent(value))
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = MotorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Output shaft speed in revolutions per minute.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Rpm(pub f32);

impl Rpm {
    /// Create a new Rpm value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRpm` unless the value is finite and > 0.
    pub fn new(value: f32) -> Result<Self, ConfigError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidRpm(value))
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Logic level a signal asserts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum ActiveLevel {
    /// Asserted when the pin is driven/read low.
    Low,
    /// Asserted when the pin is driven/read high.
    High,
}

impl ActiveLevel {
    /// Whether `is_high` corresponds to the asserted state.
    #[inline]
    pub fn is_asserted(self, is_high: bool) -> bool {
        match self {
            ActiveLevel::High => is_high,
            ActiveLevel::Low => !is_high,
        }
    }

    /// Pin level (`true` = high) that asserts the signal.
    #[inline]
    pub fn asserted_level(self) -> bool {
        matches!(self, ActiveLevel::High)
    }
}
