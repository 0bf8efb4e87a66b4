//! Travel limit policy for raw step moves.

use serde::{Deserialize, Serialize};

/// Policy for handling raw moves that would leave `[0, max_steps]`.
///
/// Without a policy the driver keeps the permissive behaviour: raw moves
/// go wherever they are told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Reject moves that would exceed limits.
    #[default]
    Reject,
    /// Clamp target to nearest limit.
    Clamp,
}

/// Travel range of the blind in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TravelLimits {
    /// Lowest allowed position (always 0).
    pub min_steps: i32,
    /// Highest allowed position.
    pub max_steps: i32,
    /// Limit policy.
    pub policy: LimitPolicy,
}

impl TravelLimits {
    /// Limits covering `0..=max_steps`.
    pub fn new(max_steps: i32, policy: LimitPolicy) -> Self {
        Self {
            min_steps: 0,
            max_steps,
            policy,
        }
    }

    /// Check if a position is within limits.
    pub fn contains(&self, steps: i32) -> bool {
        steps >= self.min_steps && steps <= self.max_steps
    }

    /// Apply limit policy to a target position.
    ///
    /// Returns `Some(steps)` if valid or clamped, `None` if rejected.
    pub fn apply(&self, target: i32) -> Option<i32> {
        if self.contains(target) {
            Some(target)
        } else {
            match self.policy {
                LimitPolicy::Reject => None,
                LimitPolicy::Clamp => {
                    if target < self.min_steps {
                        Some(self.min_steps)
                    } else {
                        Some(self.max_steps)
                    }
                }
            }
        }
    }

    /// The limit a target on the wrong side of the range ran into.
    pub fn violated_limit(&self, target: i32) -> i32 {
        if target < self.min_steps {
            self.min_steps
        } else {
            self.max_steps
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_limits_reject() {
        let limits = TravelLimits::new(1000, LimitPolicy::Reject);

        assert_eq!(limits.apply(0), Some(0));
        assert_eq!(limits.apply(1000), Some(1000));
        assert_eq!(limits.apply(1001), None);
        assert_eq!(limits.apply(-1), None);
    }

    #[test]
    fn test_travel_limits_clamp() {
        let limits = TravelLimits::new(1000, LimitPolicy::Clamp);

        assert_eq!(limits.apply(500), Some(500));
        assert_eq!(limits.apply(1500), Some(1000));
        assert_eq!(limits.apply(-20), Some(0));
    }

    #[test]
    fn test_violated_limit() {
        let limits = TravelLimits::new(1000, LimitPolicy::Reject);
        assert_eq!(limits.violated_limit(-5), 0);
        assert_eq!(limits.violated_limit(1200), 1000);
    }
}
