//! Builder pattern for StepperDriver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{ActiveLevel, Rpm};
use crate::config::{EnableSettle, LimitPolicy, MotorConfig, SystemConfig};
use crate::config::{BlindsConfig, DEFAULT_SETTLING_PULSES, DEFAULT_STEPS_PER_REVOLUTION};
use crate::error::{ConfigError, Error, Result};
use crate::store::ConfigStore;

use super::driver::StepperDriver;

/// Builder for creating StepperDriver instances.
pub struct StepperDriverBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    rpm: Option<f32>,
    steps_per_revolution: u16,
    invert_direction: bool,
    enable_active_level: ActiveLevel,
    enable_settle: EnableSettle,
    settling_pulses: u8,
    limit_policy: Option<LimitPolicy>,
    yield_hook: Option<fn()>,
}

impl<STEP, DIR, EN, DELAY> Default for StepperDriverBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, DELAY> StepperDriverBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            delay: None,
            rpm: None,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            invert_direction: false,
            enable_active_level: ActiveLevel::Low,
            enable_settle: EnableSettle::default(),
            settling_pulses: DEFAULT_SETTLING_PULSES,
            limit_policy: None,
            yield_hook: None,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the output shaft speed.
    pub fn rpm(mut self, rpm: f32) -> Self {
        self.rpm = Some(rpm);
        self
    }

    /// Set steps per revolution (base motor steps).
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.steps_per_revolution = steps;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the enable pin level that powers the coils.
    pub fn enable_active_level(mut self, level: ActiveLevel) -> Self {
        self.enable_active_level = level;
        self
    }

    /// Set the settling delays around enable-pin writes.
    pub fn enable_settle(mut self, pre_us: u32, post_us: u32) -> Self {
        self.enable_settle = EnableSettle { pre_us, post_us };
        self
    }

    /// Set the number of backward settling pulses after each move.
    pub fn settling_pulses(mut self, pulses: u8) -> Self {
        self.settling_pulses = pulses;
        self
    }

    /// Enforce travel limits on raw moves.
    pub fn limit_policy(mut self, policy: LimitPolicy) -> Self {
        self.limit_policy = Some(policy);
        self
    }

    /// Call `hook` between step edges (e.g. to service a network stack).
    pub fn yield_hook(mut self, hook: fn()) -> Self {
        self.yield_hook = Some(hook);
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.rpm = Some(config.rpm.0);
        self.steps_per_revolution = config.steps_per_revolution;
        self.invert_direction = config.invert_direction;
        self.enable_active_level = config.enable_active_level;
        self.enable_settle = config.enable_settle;
        self.settling_pulses = config.settling_pulses;
        self.limit_policy = config.limit_policy;
        self
    }

    /// Configure from the motor table of a SystemConfig.
    pub fn from_config(self, config: &SystemConfig) -> Self {
        self.from_motor_config(&config.motor)
    }

    /// Build the driver, binding it to `store` and `record`.
    ///
    /// The motor is left disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or the configuration
    /// is invalid.
    pub fn begin<'a, STORE: ConfigStore>(
        self,
        store: &'a mut STORE,
        record: &'a mut BlindsConfig,
    ) -> Result<StepperDriver<'a, STEP, DIR, EN, DELAY, STORE>> {
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::MissingField("step_pin")))?;
        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;
        let enable_pin = self
            .enable_pin
            .ok_or(Error::Config(ConfigError::MissingField("enable_pin")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;
        let rpm = self
            .rpm
            .ok_or(Error::Config(ConfigError::MissingField("rpm")))?;

        let config = MotorConfig {
            rpm: Rpm::new(rpm)?,
            steps_per_revolution: self.steps_per_revolution,
            invert_direction: self.invert_direction,
            enable_active_level: self.enable_active_level,
            enable_settle: self.enable_settle,
            settling_pulses: self.settling_pulses,
            limit_policy: self.limit_policy,
        };

        StepperDriver::with_config(
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            config,
            self.yield_hook,
            store,
            record,
        )
    }
}
