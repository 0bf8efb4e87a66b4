//! Blind control walkthrough.
//!
//! Loads the motor configuration, restores the calibration from disk, moves
//! to a few positions and simulates a short button jog. Pins are simulated,
//! so this runs on a desktop.

use std::time::Instant;

use blinds_stepper::store::FileConfigStore;
use blinds_stepper::{
    BlindsConfig, ConfigStore, DebouncedButton, JogButtons, StepperDriverBuilder,
};

/// Delay provider that does not sleep, so the demo finishes instantly.
struct FastDelay;

impl embedded_hal::delay::DelayNs for FastDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Output pin that only remembers its level.
struct SimPin {
    state: bool,
}

impl SimPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for SimPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

/// Button input that reports "held" until a deadline passes.
struct SimButton {
    held_until: Option<Instant>,
}

impl embedded_hal::digital::ErrorType for SimButton {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for SimButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.held_until.map_or(false, |t| Instant::now() < t))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Wall clock in milliseconds since the demo started.
struct DemoClock(Instant);

impl blinds_stepper::input::Clock for DemoClock {
    fn now_ms(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

fn main() {
    println!("=== Blinds Stepper Demo ===\n");

    let config = blinds_stepper::config::parse_config(
        r#"
[motor]
rpm = 30.0
limit_policy = "clamp"

[buttons]
debounce_ms = 5
"#,
    )
    .expect("Failed to parse config");
    println!(
        "Motor: {} rpm, {} us per half step",
        config.motor.rpm.value(),
        config.motor.timing().step_delay_micros
    );

    let dir = std::env::temp_dir().join("blinds-stepper-demo");
    std::fs::create_dir_all(&dir).expect("Failed to create data directory");
    let mut store = FileConfigStore::new(&dir);

    let mut blinds = BlindsConfig::new(0, 4000);
    if let Err(e) = store.read_blinds_config(&mut blinds) {
        println!("No saved calibration ({}), starting at 0/4000", e);
    }
    println!("Restored position: {}/{}", blinds.current_position, blinds.max_steps);

    let mut driver = StepperDriverBuilder::new()
        .step_pin(SimPin::new())
        .dir_pin(SimPin::new())
        .enable_pin(SimPin::new())
        .delay(FastDelay)
        .from_config(&config)
        .begin(&mut store, &mut blinds)
        .expect("Failed to start driver");

    for percent in [50, 100, 33, 0] {
        let moved = driver.move_percent(percent).expect("Move failed");
        println!(
            "move_percent({:>3}) -> moved {:>5} steps, now at {}",
            percent,
            moved,
            driver.position()
        );
    }

    println!("\n=== Jog ===");
    let clock = DemoClock(Instant::now());
    let down_pin = SimButton {
        held_until: Some(Instant::now() + std::time::Duration::from_millis(40)),
    };
    let up_pin = SimButton { held_until: None };
    let mut buttons = JogButtons::new(
        DebouncedButton::with_config(up_pin, &clock, &config.buttons),
        DebouncedButton::with_config(down_pin, &clock, &config.buttons),
    );

    let deadline = Instant::now() + std::time::Duration::from_millis(100);
    let mut total = 0;
    while Instant::now() < deadline {
        total += driver.move_buttons(&mut buttons, false).expect("Jog failed");
    }
    println!("Jogged {} steps, now at {}", total, driver.position());

    let (step, dir, enable, _delay) = driver.release();
    println!(
        "Pins after release: step={} dir={} enable={}",
        step.state, dir.state, enable.state
    );
    println!("\nSaved position: {}/{}", blinds.current_position, blinds.max_steps);
    println!("=== Demo Complete ===");
}
