//! Integration tests for configuration loading and record persistence.

mod common;

use std::fs;
use std::path::PathBuf;

use blinds_stepper::config::{parse_config, LimitPolicy};
use blinds_stepper::error::{ConfigError, Error};
use blinds_stepper::store::{FileConfigStore, BLINDS_CONFIG_FILE};
use blinds_stepper::{ActiveLevel, BlindsConfig, ConfigStore, StepperDriverBuilder, WebConfig};
use common::Recorder;

// =============================================================================
// Test configuration data
// =============================================================================

const MINIMAL_CONFIG: &str = r#"
[motor]
rpm = 10.0
"#;

const FULL_CONFIG: &str = r#"
[motor]
rpm = 20.0
steps_per_revolution = 200
invert_direction = false
enable_active_level = "low"
settling_pulses = 2
limit_policy = "reject"

[motor.enable_settle]
pre_us = 500
post_us = 10

[buttons]
debounce_ms = 50
active_level = "high"
"#;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "blinds-stepper-it-{}-{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn parse_minimal_config_uses_defaults() {
    let config = parse_config(MINIMAL_CONFIG).expect("Should parse minimal config");

    assert_eq!(config.motor.steps_per_revolution, 200);
    assert_eq!(config.motor.enable_active_level, ActiveLevel::Low);
    assert_eq!(config.motor.enable_settle.pre_us, 100);
    assert_eq!(config.motor.enable_settle.post_us, 50);
    assert_eq!(config.motor.settling_pulses, 2);
    assert_eq!(config.motor.limit_policy, None);
    assert_eq!(config.buttons.debounce_ms, 50);
    assert_eq!(config.motor.timing().step_delay_micros, 15000);
}

#[test]
fn parse_full_config() {
    let config = parse_config(FULL_CONFIG).expect("Should parse full config");

    assert_eq!(config.motor.limit_policy, Some(LimitPolicy::Reject));
    assert_eq!(config.motor.enable_settle.pre_us, 500);
    assert_eq!(config.motor.timing().step_delay_micros, 7500);
    assert_eq!(config.buttons.active_level, ActiveLevel::High);
}

#[test]
fn parse_rejects_unknown_policy() {
    let toml = r#"
[motor]
rpm = 10.0
limit_policy = "wrap"
"#;

    assert!(matches!(
        parse_config(toml),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

#[test]
fn parse_requires_rpm() {
    let toml = r#"
[motor]
steps_per_revolution = 200
"#;

    assert!(parse_config(toml).is_err());
}

#[test]
fn load_config_from_file() {
    let dir = scratch_dir("load");
    let path = dir.join("blinds.toml");
    fs::write(&path, FULL_CONFIG).unwrap();

    let config = blinds_stepper::load_config(&path).expect("Should load from file");
    assert_eq!(config.motor.rpm.value(), 20.0);

    let _ = fs::remove_dir_all(dir);
}

// =============================================================================
// Driver from configuration
// =============================================================================

#[test]
fn driver_built_from_config_applies_settings() {
    let config = parse_config(FULL_CONFIG).unwrap();
    let rec = Recorder::new();
    let mut store = blinds_stepper::MemoryStore::new();
    let mut record = BlindsConfig::new(0, 100);

    let mut driver = StepperDriverBuilder::new()
        .step_pin(rec.step_pin())
        .dir_pin(rec.dir_pin())
        .enable_pin(rec.enable_pin())
        .delay(rec.delay())
        .from_config(&config)
        .begin(&mut store, &mut record)
        .unwrap();

    assert_eq!(driver.step_delay_micros(), 7500);
    assert_eq!(
        rec.events()[..3],
        [
            common::Event::DelayUs(500),
            common::Event::Enable(true),
            common::Event::DelayUs(10)
        ]
    );
    // Reject policy from the file.
    assert!(driver.move_steps(150).is_err());
    assert_eq!(driver.position(), 0);
}

// =============================================================================
// File persistence across restarts
// =============================================================================

#[test]
fn position_survives_restart() {
    let dir = scratch_dir("restart");
    let mut store = FileConfigStore::new(&dir);
    store
        .save_blinds_config(&BlindsConfig::new(0, 1000))
        .unwrap();

    // First boot: load calibration, move.
    {
        let mut record = BlindsConfig::default();
        store.read_blinds_config(&mut record).unwrap();
        let rec = Recorder::new();
        let mut driver = StepperDriverBuilder::new()
            .step_pin(rec.step_pin())
            .dir_pin(rec.dir_pin())
            .enable_pin(rec.enable_pin())
            .delay(rec.delay())
            .rpm(10.0)
            .begin(&mut store, &mut record)
            .unwrap();
        driver.move_percent(75).unwrap();
    }

    // Second boot: the saved position is read back.
    let mut record = BlindsConfig::default();
    FileConfigStore::new(&dir)
        .read_blinds_config(&mut record)
        .unwrap();
    assert_eq!(record, BlindsConfig::new(750, 1000));

    let text = fs::read_to_string(dir.join(BLINDS_CONFIG_FILE)).unwrap();
    assert!(text.contains("currentPosition = 750"));

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn web_record_round_trips_through_files() {
    let dir = scratch_dir("web");
    let mut store = FileConfigStore::new(&dir);
    let mut web = WebConfig::default();
    web.ssid.push_str("attic").unwrap();
    web.mqtt_username.push_str("blinds").unwrap();
    web.mqtt_port = 8883;

    store.save_web_config(&web).unwrap();

    let mut loaded = WebConfig::default();
    store.read_web_config(&mut loaded).unwrap();
    assert_eq!(loaded.ssid.as_str(), "attic");
    assert_eq!(loaded.mqtt_port, 8883);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn oversized_web_field_is_rejected() {
    let dir = scratch_dir("oversized");
    fs::write(
        dir.join("webConfig.toml"),
        "ssid = \"a-network-name-that-is-too-long-to-fit\"\n",
    )
    .unwrap();
    let mut store = FileConfigStore::new(&dir);
    let mut web = WebConfig::default();

    assert!(store.read_web_config(&mut web).is_err());
    assert_eq!(web, WebConfig::default());

    let _ = fs::remove_dir_all(dir);
}
