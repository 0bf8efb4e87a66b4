//! Shared test doubles: recording pins and delay, scripted buttons, and a
//! store that always fails.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use blinds_stepper::error::{Error, Result, StorageError};
use embedded_hal::digital::ErrorKind;
use blinds_stepper::{BlindsConfig, ConfigStore, DebouncedInput, InputState, WebConfig};

/// Something that happened on the motor interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Step(bool),
    Dir(bool),
    Enable(bool),
    DelayUs(u32),
}

#[derive(Debug, Clone, Copy)]
enum Line {
    Step,
    Dir,
    Enable,
}

/// Shared, ordered log of pin writes and delays.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_pin(&self) -> RecordingPin {
        RecordingPin::new(Line::Step, self.clone())
    }

    /// Step pin whose `nth` rising edge (1-based) fails and is not logged.
    pub fn step_pin_failing_at(&self, nth: usize) -> RecordingPin {
        RecordingPin {
            fail_at: Some(nth),
            ..RecordingPin::new(Line::Step, self.clone())
        }
    }

    pub fn dir_pin(&self) -> RecordingPin {
        RecordingPin::new(Line::Dir, self.clone())
    }

    pub fn enable_pin(&self) -> RecordingPin {
        RecordingPin::new(Line::Enable, self.clone())
    }

    pub fn delay(&self) -> RecordingDelay {
        RecordingDelay { log: self.clone() }
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Rising edges on the step pin.
    pub fn pulses(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| **e == Event::Step(true))
            .count()
    }

    /// Rising edges split by the direction level at the time: (forward, backward).
    pub fn pulses_by_direction(&self) -> (usize, usize) {
        let mut dir_high = false;
        let mut forward = 0;
        let mut backward = 0;
        for event in self.0.borrow().iter() {
            match event {
                Event::Dir(level) => dir_high = *level,
                Event::Step(true) => {
                    if dir_high {
                        forward += 1;
                    } else {
                        backward += 1;
                    }
                }
                _ => {}
            }
        }
        (forward, backward)
    }

    /// Level of the last enable write.
    pub fn enable_level(&self) -> Option<bool> {
        self.0.borrow().iter().rev().find_map(|e| match e {
            Event::Enable(level) => Some(*level),
            _ => None,
        })
    }

    /// Level of the first direction write.
    pub fn first_direction(&self) -> Option<bool> {
        self.0.borrow().iter().find_map(|e| match e {
            Event::Dir(level) => Some(*level),
            _ => None,
        })
    }
}

/// Output pin that logs every write, optionally failing one rising edge.
pub struct RecordingPin {
    line: Line,
    log: Recorder,
    rising: usize,
    fail_at: Option<usize>,
}

impl embedded_hal::digital::ErrorType for RecordingPin {
    type Error = ErrorKind;
}

impl embedded_hal::digital::OutputPin for RecordingPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.rising += 1;
        if self.fail_at == Some(self.rising) {
            return Err(ErrorKind::Other);
        }
        self.write(true);
        Ok(())
    }
}

impl RecordingPin {
    fn new(line: Line, log: Recorder) -> Self {
        Self {
            line,
            log,
            rising: 0,
            fail_at: None,
        }
    }

    fn write(&self, level: bool) {
        let event = match self.line {
            Line::Step => Event::Step(level),
            Line::Dir => Event::Dir(level),
            Line::Enable => Event::Enable(level),
        };
        self.log.push(event);
    }
}

/// Delay provider that logs instead of sleeping.
pub struct RecordingDelay {
    log: Recorder,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::DelayUs(ns / 1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::DelayUs(us));
    }
}

/// Button that is held for a scripted number of polls.
pub struct ScriptedInput {
    script: VecDeque<bool>,
    state: InputState,
}

impl ScriptedInput {
    /// Never pressed.
    pub fn idle() -> Self {
        Self::from_levels(&[])
    }

    /// Active for the first `polls` polls, released afterwards.
    pub fn held_for(polls: usize) -> Self {
        Self {
            script: std::iter::repeat(true).take(polls).collect(),
            state: InputState::Inactive,
        }
    }

    /// Explicit per-poll levels; released once the script runs out.
    pub fn from_levels(levels: &[bool]) -> Self {
        Self {
            script: levels.iter().copied().collect(),
            state: InputState::Inactive,
        }
    }
}

impl DebouncedInput for ScriptedInput {
    fn poll(&mut self) {
        let active = self.script.pop_front().unwrap_or(false);
        self.state = if active {
            InputState::Active
        } else {
            InputState::Inactive
        };
    }

    fn state(&self) -> InputState {
        self.state
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub save_attempts: usize,
}

impl ConfigStore for FailingStore {
    fn read_blinds_config(&mut self, _config: &mut BlindsConfig) -> Result<()> {
        Err(Error::Storage(StorageError::io("flash unavailable")))
    }

    fn save_blinds_config(&mut self, _config: &BlindsConfig) -> Result<()> {
        self.save_attempts += 1;
        Err(Error::Storage(StorageError::io("flash unavailable")))
    }

    fn read_web_config(&mut self, _config: &mut WebConfig) -> Result<()> {
        Err(Error::Storage(StorageError::io("flash unavailable")))
    }

    fn save_web_config(&mut self, _config: &WebConfig) -> Result<()> {
        Err(Error::Storage(StorageError::io("flash unavailable")))
    }
}
