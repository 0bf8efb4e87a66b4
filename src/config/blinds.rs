//! Persisted blind calibration: where the blind is and how far it can go.

use serde::{Deserialize, Serialize};

/// Position record of the blind.
///
/// Owned by the caller and lent to the driver, which mutates it in place
/// and asks the config store to persist it after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "camelCase")]
pub struct BlindsConfig {
    /// Current position in steps from fully open.
    #[serde(default)]
    pub current_position: i32,
    /// Steps from fully open to fully closed.
    #[serde(default)]
    pub max_steps: i32,
}

impl BlindsConfig {
    /// Create a record at `current_position` of `max_steps`.
    pub const fn new(current_position: i32, max_steps: i32) -> Self {
        Self {
            current_position,
            max_steps,
        }
    }

    /// Whether `0 <= current_position <= max_steps`.
    #[inline]
    pub fn is_within_travel(&self) -> bool {
        self.current_position >= 0 && self.current_position <= self.max_steps
    }

    /// Steps in one percent of the travel.
    #[inline]
    pub fn one_percent_steps(&self) -> f64 {
        self.max_steps as f64 / 100.0
    }

    /// Current position as a truncated percentage of the travel.
    ///
    /// Returns `None` when the travel has not been calibrated.
    pub fn percent(&self) -> Option<i32> {
        if self.max_steps <= 0 {
            return None;
        }
        Some((self.current_position as i64 * 100 / self.max_steps as i64) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_travel() {
        assert!(BlindsConfig::new(0, 1000).is_within_travel());
        assert!(BlindsConfig::new(1000, 1000).is_within_travel());
        assert!(!BlindsConfig::new(-1, 1000).is_within_travel());
        assert!(!BlindsConfig::new(1001, 1000).is_within_travel());
    }

    #[test]
    fn test_percent() {
        assert_eq!(BlindsConfig::new(500, 1000).percent(), Some(50));
        assert_eq!(BlindsConfig::new(333, 1000).percent(), Some(33));
        assert_eq!(BlindsConfig::new(10, 0).percent(), None);
    }
}
