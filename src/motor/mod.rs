//! Motor module for blinds-stepper.
//!
//! Provides the stepper driver: percent and raw step moves, button jogging,
//! and persistence of the position record after every move.

mod builder;
mod driver;
mod position;
pub mod state;

pub use builder::StepperDriverBuilder;
pub use driver::StepperDriver;
pub use position::steps_to_percent;
pub use state::{Direction, EnableState, JogState};
