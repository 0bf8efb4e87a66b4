//! Percent-to-steps conversion.

use crate::config::units::Percent;
use crate::config::BlindsConfig;

/// Steps needed to move from the record's position to `percent` of travel.
///
/// The ends are exact: 0 returns to zero and 100 goes to `max_steps`. In
/// between the target is `percent * max_steps / 100` minus the current
/// position, truncated toward zero.
pub fn steps_to_percent(record: &BlindsConfig, percent: Percent) -> i32 {
    match percent {
        Percent::MIN => record.current_position.saturating_neg(),
        Percent::MAX => record.max_steps.saturating_sub(record.current_position),
        p => {
            let needed =
                p.value() as f64 * record.one_percent_steps() - record.current_position as f64;
            // `as` truncates toward zero and saturates.
            needed as i32
        }
    }
}
