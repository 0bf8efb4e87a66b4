//! Configuration module for blinds-stepper.
//!
//! Provides the motor configuration loaded from TOML files (with `std`
//! feature) or built in code, and the two persisted records: blind
//! calibration and network settings.

mod blinds;
mod limits;
mod motor;
mod system;
mod timing;
pub mod units;
mod web;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use blinds::BlindsConfig;
pub use limits::{LimitPolicy, TravelLimits};
pub use motor::{EnableSettle, MotorConfig, DEFAULT_SETTLING_PULSES};
pub use system::{ButtonConfig, SystemConfig, DEFAULT_DEBOUNCE_MS};
pub use timing::{StepTiming, DEFAULT_STEPS_PER_REVOLUTION};
pub use validation::{validate_config, validate_motor};
pub use web::{WebConfig, WEB_FIELD_LEN};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{ActiveLevel, Percent, Rpm};
