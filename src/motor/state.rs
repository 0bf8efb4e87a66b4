//! Driver state: coil power, travel direction, and jog gesture.

/// Whether the driver board powers the coils.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EnableState {
    /// Coils powered, motor holds and steps.
    Enabled,
    /// Coils off, shaft free.
    #[default]
    Disabled,
}

/// Travel direction of the blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing position (lowering the blind).
    Forward,
    /// Decreasing position (raising the blind).
    Backward,
}

impl Direction {
    /// Direction of a signed step count; `None` for zero.
    #[inline]
    pub fn of(steps: i32) -> Option<Self> {
        match steps {
            s if s > 0 => Some(Direction::Forward),
            s if s < 0 => Some(Direction::Backward),
            _ => None,
        }
    }

    /// +1 or -1.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Button jog state machine.
///
/// Advanced once per [`move_buttons`](super::StepperDriver::move_buttons)
/// tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Down button held, stepping forward.
    JoggingForward,
    /// Up button held, stepping backward.
    JoggingBackward,
}

impl JogState {
    /// Direction of the gesture in progress.
    pub fn direction(self) -> Option<Direction> {
        match self {
            JogState::Idle => None,
            JogState::JoggingForward => Some(Direction::Forward),
            JogState::JoggingBackward => Some(Direction::Backward),
        }
    }
}
