//! Step timing derived from motor configuration.

use super::units::Rpm;

/// Full steps per revolution of a standard 1.8° motor without microstepping.
pub const DEFAULT_STEPS_PER_REVOLUTION: u16 = 200;

/// Derived step timing, computed once at `begin` and on every rpm change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepTiming {
    /// Hold time of each half of a step pulse, in microseconds.
    pub step_delay_micros: u32,
}

impl StepTiming {
    /// Compute timing for `rpm` on a motor with `steps_per_revolution` steps.
    ///
    /// Each step is two equal half-pulses, so
    /// `delay = round(60_000_000 / (steps_per_revolution * rpm * 2))`.
    pub fn from_rpm(rpm: Rpm, steps_per_revolution: u16) -> Self {
        let half_steps_per_minute = steps_per_revolution as f64 * rpm.0 as f64 * 2.0;
        let delay = libm::round(60_000_000.0 / half_steps_per_minute);
        // Saturating float-to-int cast keeps absurd rpm values in range.
        Self {
            step_delay_micros: delay as u32,
        }
    }
}
