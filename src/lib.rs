//! # blinds-stepper
//!
//! Stepper motor control for a motorized window blind, with embedded-hal 1.0
//! support.
//!
//! ## Features
//!
//! - **Percent positioning**: Move to any percentage of the calibrated travel
//! - **Raw step moves**: Signed step moves with backlash settling pulses
//! - **Button jogging**: Tick-driven jog state machine with soft limits
//! - **Persisted calibration**: Position saved after every move through a
//!   pluggable [`store::ConfigStore`]
//! - **embedded-hal 1.0**: Uses `OutputPin` for STEP/DIR/ENABLE, `InputPin`
//!   for buttons, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blinds_stepper::{BlindsConfig, StepperDriver};
//! use blinds_stepper::store::{ConfigStore, FileConfigStore};
//!
//! let mut store = FileConfigStore::new("/data");
//! let mut blinds = BlindsConfig::default();
//! store.read_blinds_config(&mut blinds)?;
//!
//! let mut driver = StepperDriver::begin(step, dir, enable, delay, 10.0, &mut store, &mut blinds)?;
//! driver.move_percent(50)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file-backed storage and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables logging through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod input;
pub mod motor;
pub mod store;

// Re-exports for ergonomic API
pub use config::{validate_config, BlindsConfig, MotorConfig, SystemConfig, WebConfig};
pub use error::{Error, Result};
pub use input::{DebouncedButton, DebouncedInput, InputState, JogButtons};
pub use motor::{Direction, EnableState, JogState, StepperDriver, StepperDriverBuilder};
pub use store::{ConfigStore, MemoryStore};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{ActiveLevel, Percent, Rpm};
