//! Debounced jog buttons.
//!
//! A raw level has to hold for the debounce window before it is reported,
//! so contact bounce never starts or stops a jog.

use embedded_hal::digital::InputPin;

use crate::config::{ActiveLevel, ButtonConfig};

/// Debounced level of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputState {
    /// Button held.
    Active,
    /// Button released.
    #[default]
    Inactive,
}

/// An input whose state only changes after it has settled.
pub trait DebouncedInput {
    /// Sample the input and advance the debounce state.
    fn poll(&mut self);

    /// Current debounced level.
    fn state(&self) -> InputState;

    /// Shorthand for `state() == InputState::Active`.
    fn is_active(&self) -> bool {
        self.state() == InputState::Active
    }
}

/// Monotonic millisecond time source.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch; may wrap.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Button on an input pin, debounced against a [`Clock`].
pub struct DebouncedButton<P, C>
where
    P: InputPin,
    C: Clock,
{
    pin: P,
    clock: C,
    active_level: ActiveLevel,
    debounce_ms: u32,
    /// Last reported state.
    stable: InputState,
    /// Raw state seen on the latest sample.
    raw: InputState,
    /// When `raw` was first seen.
    raw_since_ms: u32,
}

impl<P, C> DebouncedButton<P, C>
where
    P: InputPin,
    C: Clock,
{
    /// Create a button with the default 50 ms window, pressed = high.
    pub fn new(pin: P, clock: C) -> Self {
        Self::with_config(pin, clock, &ButtonConfig::default())
    }

    /// Create a button from configuration.
    pub fn with_config(pin: P, clock: C, config: &ButtonConfig) -> Self {
        let now = clock.now_ms();
        Self {
            pin,
            clock,
            active_level: config.active_level,
            debounce_ms: config.debounce_ms,
            stable: InputState::Inactive,
            raw: InputState::Inactive,
            raw_since_ms: now,
        }
    }

    /// Change the debounce window.
    pub fn set_debounce_time(&mut self, ms: u32) {
        self.debounce_ms = ms;
    }

    /// Release the pin and clock.
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

impl<P, C> DebouncedInput for DebouncedButton<P, C>
where
    P: InputPin,
    C: Clock,
{
    fn poll(&mut self) {
        let is_high = match self.pin.is_high() {
            Ok(level) => level,
            Err(_) => {
                warn!("button read failed, sample skipped");
                return;
            }
        };

        let now = self.clock.now_ms();
        let raw = if self.active_level.is_asserted(is_high) {
            InputState::Active
        } else {
            InputState::Inactive
        };

        if raw != self.raw {
            self.raw = raw;
            self.raw_since_ms = now;
        }

        if self.raw != self.stable && now.wrapping_sub(self.raw_since_ms) >= self.debounce_ms {
            self.stable = self.raw;
            trace!("button -> {:?}", self.stable);
        }
    }

    fn state(&self) -> InputState {
        self.stable
    }
}

/// The up/down pair used for jogging.
pub struct JogButtons<UP, DOWN>
where
    UP: DebouncedInput,
    DOWN: DebouncedInput,
{
    /// Raises the blind (towards position 0).
    pub up: UP,
    /// Lowers the blind (towards `max_steps`).
    pub down: DOWN,
}

impl<UP, DOWN> JogButtons<UP, DOWN>
where
    UP: DebouncedInput,
    DOWN: DebouncedInput,
{
    /// Pair two inputs.
    pub fn new(up: UP, down: DOWN) -> Self {
        Self { up, down }
    }

    /// Poll both inputs once.
    pub fn poll(&mut self) {
        self.down.poll();
        self.up.poll();
    }
}
