//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin types. Borrows the caller's position
//! record and config store for its whole lifetime and persists the record
//! after every move.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Percent, Rpm};
use crate::config::{validate_motor, BlindsConfig, MotorConfig, StepTiming, TravelLimits};
use crate::error::{MotorError, Result};
use crate::input::{DebouncedInput, JogButtons};
use crate::store::ConfigStore;

use super::position::steps_to_percent;
use super::state::{Direction, EnableState, JogState};

/// Stepper motor driver for a window blind.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `EN`: ENABLE pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
/// - `STORE`: Where the position record is persisted
pub struct StepperDriver<'a, STEP, DIR, EN, DELAY, STORE>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    STORE: ConfigStore,
{
    /// STEP pin (one high/low pulse per step).
    step_pin: STEP,

    /// DIR pin (high = forward unless inverted).
    dir_pin: DIR,

    /// ENABLE pin (powers the coils).
    enable_pin: EN,

    /// Delay provider for pulse timing and enable settling.
    delay: DELAY,

    /// Persistence for the position record.
    store: &'a mut STORE,

    /// Position record owned by the caller.
    record: &'a mut BlindsConfig,

    /// Motor configuration.
    config: MotorConfig,

    /// Timing derived from `config.rpm`.
    timing: StepTiming,

    enable_state: EnableState,

    jog: JogState,

    /// Signed steps of the jog gesture in progress.
    jog_steps: i32,

    /// Signed steps of the last finished jog gesture.
    last_jog_steps: i32,

    /// Called between step edges so cooperative tasks can run.
    yield_hook: Option<fn()>,
}

impl<'a, STEP, DIR, EN, DELAY, STORE> StepperDriver<'a, STEP, DIR, EN, DELAY, STORE>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    STORE: ConfigStore,
{
    /// Initialize the driver at `rpm` with default settings.
    ///
    /// Derives the step delay, keeps the store and record borrows, and
    /// leaves the motor disabled. No storage I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRpm` for a non-positive rpm and
    /// `MotorError::PinError` if the enable pin cannot be written.
    pub fn begin(
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        delay: DELAY,
        rpm: f32,
        store: &'a mut STORE,
        record: &'a mut BlindsConfig,
    ) -> Result<Self> {
        let config = MotorConfig::with_rpm(Rpm::new(rpm)?);
        Self::with_config(step_pin, dir_pin, enable_pin, delay, config, None, store, record)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_config(
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        delay: DELAY,
        config: MotorConfig,
        yield_hook: Option<fn()>,
        store: &'a mut STORE,
        record: &'a mut BlindsConfig,
    ) -> Result<Self> {
        validate_motor(&config)?;
        let timing = config.timing();

        let mut driver = Self {
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            store,
            record,
            config,
            timing,
            enable_state: EnableState::Disabled,
            jog: JogState::Idle,
            jog_steps: 0,
            last_jog_steps: 0,
            yield_hook,
        };

        driver.disable()?;
        if !driver.record.is_within_travel() {
            warn!(
                "position {} outside travel 0..={}",
                driver.record.current_position,
                driver.record.max_steps
            );
        }
        info!(
            "stepper ready: {} us per half step, position {}/{}",
            driver.timing.step_delay_micros,
            driver.record.current_position,
            driver.record.max_steps
        );
        Ok(driver)
    }

    /// Current position in steps.
    #[inline]
    pub fn position(&self) -> i32 {
        self.record.current_position
    }

    /// Calibrated travel in steps.
    #[inline]
    pub fn max_steps(&self) -> i32 {
        self.record.max_steps
    }

    /// The borrowed position record.
    #[inline]
    pub fn record(&self) -> &BlindsConfig {
        &*self.record
    }

    /// Current position as a truncated percentage of travel.
    #[inline]
    pub fn percent(&self) -> Option<i32> {
        self.record.percent()
    }

    /// Hold time of each half of a step pulse.
    #[inline]
    pub fn step_delay_micros(&self) -> u32 {
        self.timing.step_delay_micros
    }

    /// Derived step timing.
    #[inline]
    pub fn timing(&self) -> StepTiming {
        self.timing
    }

    /// Motor configuration in use.
    #[inline]
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Whether the coils are powered.
    #[inline]
    pub fn enable_state(&self) -> EnableState {
        self.enable_state
    }

    /// Shorthand for `enable_state() == EnableState::Enabled`.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enable_state == EnableState::Enabled
    }

    /// Jog gesture in progress.
    #[inline]
    pub fn jog_state(&self) -> JogState {
        self.jog
    }

    /// Signed step count of the last finished jog gesture.
    #[inline]
    pub fn last_jog_steps(&self) -> i32 {
        self.last_jog_steps
    }

    /// Change the speed and re-derive the step delay.
    pub fn set_rpm(&mut self, rpm: f32) -> Result<()> {
        self.config.rpm = Rpm::new(rpm)?;
        self.timing = self.config.timing();
        debug!("rpm changed, {} us per half step", self.timing.step_delay_micros);
        Ok(())
    }

    /// Install or clear the cooperative yield hook.
    pub fn set_yield_hook(&mut self, hook: Option<fn()>) {
        self.yield_hook = hook;
    }

    /// Record a new calibrated travel and persist it.
    pub fn set_max_steps(&mut self, max_steps: i32) -> Result<()> {
        self.record.max_steps = max_steps;
        info!("max steps set to {}", max_steps);
        self.persist()
    }

    /// Overwrite the believed position without moving, and persist it.
    pub fn set_current_position(&mut self, position: i32) -> Result<()> {
        self.record.current_position = position;
        info!("position set to {}", position);
        self.persist()
    }

    /// Move to `percent` of the travel.
    ///
    /// 0 and 100 go exactly to the ends; anything between truncates toward
    /// zero. Returns the signed steps moved; 0 means nothing happened (no
    /// enable, no save).
    ///
    /// # Errors
    ///
    /// `MotorError::InvalidPercent` above 100, otherwise whatever
    /// [`move_steps`](Self::move_steps) reports.
    pub fn move_percent(&mut self, percent: u8) -> Result<i32> {
        let percent = Percent::new(percent)?;
        let delta = steps_to_percent(&*self.record, percent);
        if delta == 0 {
            debug!("already at {}%", percent.value());
            return Ok(0);
        }
        self.move_steps(delta)
    }

    /// Move by a signed number of steps.
    ///
    /// Positive steps lower the blind. After the run the motor issues its
    /// settling pulses backward, powers down, and the record is saved. Zero
    /// is a no-op. A jog in progress is finished first.
    ///
    /// Returns the signed steps actually moved, which differs from `steps`
    /// only under [`LimitPolicy::Clamp`](crate::config::LimitPolicy::Clamp).
    ///
    /// # Errors
    ///
    /// - `MotorError::LimitExceeded` under the reject policy (nothing moves)
    /// - `MotorError::PinError` if a pin write fails; the motor is still
    ///   powered down and the position, counting only the steps emitted
    ///   before the failure, is saved
    /// - `Error::Storage` if the save fails (the motor has already moved)
    pub fn move_steps(&mut self, steps: i32) -> Result<i32> {
        if self.jog != JogState::Idle {
            self.finish_jog()?;
        }

        let steps = self.limit(steps)?;
        let direction = match Direction::of(steps) {
            Some(direction) => direction,
            None => return Ok(0),
        };

        self.enable()?;
        let motion = self
            .run(direction, steps.unsigned_abs())
            .and_then(|()| self.settle());
        self.wind_down(motion)?;

        info!(
            "moved {} steps, position {}/{}",
            steps,
            self.record.current_position,
            self.record.max_steps
        );
        Ok(steps)
    }

    /// Advance the button jog by one tick.
    ///
    /// Polls both buttons once. Down lowers the blind, up raises it; while
    /// `manual_mode` is false the blind stays within `[0, max_steps]`. A held
    /// button produces one step per tick; releasing it (or reaching a limit)
    /// ends the gesture with settling pulses, power-down and a save.
    ///
    /// Returns the signed steps moved during this tick.
    pub fn move_buttons<UP, DOWN>(
        &mut self,
        buttons: &mut JogButtons<UP, DOWN>,
        manual_mode: bool,
    ) -> Result<i32>
    where
        UP: DebouncedInput,
        DOWN: DebouncedInput,
    {
        buttons.poll();
        let down = buttons.down.is_active();
        let up = buttons.up.is_active();

        match self.jog.direction() {
            None => {
                if down && self.may_jog(Direction::Forward, manual_mode) {
                    self.start_jog(Direction::Forward)
                } else if up && self.may_jog(Direction::Backward, manual_mode) {
                    self.start_jog(Direction::Backward)
                } else {
                    Ok(0)
                }
            }
            Some(direction) => {
                let held = match direction {
                    Direction::Forward => down,
                    Direction::Backward => up,
                };
                if held && self.may_jog(direction, manual_mode) {
                    self.jog_step(direction)
                } else {
                    self.finish_jog().map(|_| 0)
                }
            }
        }
    }

    /// Jog until the gesture ends, blocking for as long as the button is held.
    ///
    /// Returns the signed steps of the whole gesture, 0 if none started.
    pub fn jog_blocking<UP, DOWN>(
        &mut self,
        buttons: &mut JogButtons<UP, DOWN>,
        manual_mode: bool,
    ) -> Result<i32>
    where
        UP: DebouncedInput,
        DOWN: DebouncedInput,
    {
        let mut total = self.move_buttons(buttons, manual_mode)?;
        while self.jog != JogState::Idle {
            total += self.move_buttons(buttons, manual_mode)?;
        }
        Ok(total)
    }

    /// Power the coils.
    pub fn enable(&mut self) -> Result<()> {
        let level = self.config.enable_active_level.asserted_level();
        self.write_enable(level)?;
        self.enable_state = EnableState::Enabled;
        Ok(())
    }

    /// Release the coils. Safe to call repeatedly.
    pub fn disable(&mut self) -> Result<()> {
        let level = !self.config.enable_active_level.asserted_level();
        self.write_enable(level)?;
        self.enable_state = EnableState::Disabled;
        Ok(())
    }

    /// Give back the pins and delay provider; the borrows end here.
    pub fn release(self) -> (STEP, DIR, EN, DELAY) {
        (self.step_pin, self.dir_pin, self.enable_pin, self.delay)
    }

    fn write_enable(&mut self, high: bool) -> Result<()> {
        let settle = self.config.enable_settle;
        self.delay.delay_us(settle.pre_us);
        set_level(&mut self.enable_pin, high)?;
        self.delay.delay_us(settle.post_us);
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> Result<()> {
        let high = match direction {
            Direction::Forward => !self.config.invert_direction,
            Direction::Backward => self.config.invert_direction,
        };
        set_level(&mut self.dir_pin, high)
    }

    /// One step pulse: high, hold, yield, low, hold, yield.
    fn one_step(&mut self) -> Result<()> {
        let hold = self.timing.step_delay_micros;
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(hold);
        self.yield_now();
        self.step_pin.set_low().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(hold);
        self.yield_now();
        Ok(())
    }

    #[inline]
    fn yield_now(&self) {
        if let Some(hook) = self.yield_hook {
            hook();
        }
    }

    fn run(&mut self, direction: Direction, count: u32) -> Result<()> {
        self.set_direction(direction)?;
        let sign = direction.sign();
        for _ in 0..count {
            self.one_step()?;
            self.record.current_position = self.record.current_position.saturating_add(sign);
        }
        Ok(())
    }

    /// Backlash pulses, always backward; the position is not updated.
    fn settle(&mut self) -> Result<()> {
        self.set_direction(Direction::Backward)?;
        for _ in 0..self.config.settling_pulses {
            self.one_step()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save_blinds_config(&*self.record).map_err(|e| {
            error!(
                "failed to save position {}: {}",
                self.record.current_position,
                e
            );
            e
        })
    }

    /// Apply the configured limit policy to a raw move.
    fn limit(&self, steps: i32) -> Result<i32> {
        let policy = match self.config.limit_policy {
            Some(policy) => policy,
            None => return Ok(steps),
        };

        let current = self.record.current_position;
        let target = current.saturating_add(steps);
        let limits = TravelLimits::new(self.record.max_steps, policy);
        match limits.apply(target) {
            Some(allowed) => Ok(allowed.saturating_sub(current)),
            None => {
                warn!("move to {} rejected", target);
                Err(MotorError::LimitExceeded {
                    position: target,
                    limit: limits.violated_limit(target),
                }
                .into())
            }
        }
    }

    fn may_jog(&self, direction: Direction, manual_mode: bool) -> bool {
        manual_mode
            || match direction {
                Direction::Forward => self.record.current_position < self.record.max_steps,
                Direction::Backward => self.record.current_position > 0,
            }
    }

    fn start_jog(&mut self, direction: Direction) -> Result<i32> {
        self.enable()?;
        if let Err(e) = self.set_direction(direction) {
            let _ = self.disable();
            return Err(e);
        }
        self.jog = match direction {
            Direction::Forward => JogState::JoggingForward,
            Direction::Backward => JogState::JoggingBackward,
        };
        self.jog_steps = 0;
        debug!("jog started {:?}", direction);
        self.jog_step(direction)
    }

    fn jog_step(&mut self, direction: Direction) -> Result<i32> {
        if let Err(e) = self.one_step() {
            self.jog = JogState::Idle;
            self.last_jog_steps = self.jog_steps;
            self.jog_steps = 0;
            return self.wind_down(Err(e)).map(|()| 0);
        }
        let sign = direction.sign();
        self.record.current_position = self.record.current_position.saturating_add(sign);
        self.jog_steps += sign;
        Ok(sign)
    }

    fn finish_jog(&mut self) -> Result<()> {
        self.jog = JogState::Idle;
        self.last_jog_steps = self.jog_steps;
        self.jog_steps = 0;

        let settled = self.settle();
        self.wind_down(settled)?;

        info!(
            "jog moved {} steps, position {}/{}",
            self.last_jog_steps,
            self.record.current_position,
            self.record.max_steps
        );
        Ok(())
    }

    /// Power down and save after stepping, even when `motion` failed.
    ///
    /// Returns the first error of motion, disable and save, in that order.
    fn wind_down(&mut self, motion: Result<()>) -> Result<()> {
        if motion.is_err() {
            warn!(
                "stepping failed, saving position {}",
                self.record.current_position
            );
        }
        let disabled = self.disable();
        let saved = self.persist();
        motion.and(disabled).and(saved)
    }
}

/// Drive `pin` to `high`.
fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<()> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| MotorError::PinError.into())
}
