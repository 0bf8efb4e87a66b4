//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - RPM is finite and positive
/// - Steps per revolution is non-zero
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_motor(&config.motor)
}

/// Validate a single motor configuration.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    let rpm = config.rpm.0;
    if !rpm.is_finite() || rpm <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidRpm(rpm)));
    }

    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Rpm;

    #[test]
    fn test_invalid_rpm() {
        let config = MotorConfig::with_rpm(Rpm(-1.0));

        let result = validate_motor(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidRpm(_)))
        ));
    }

    #[test]
    fn test_zero_steps_per_revolution() {
        let mut config = MotorConfig::with_rpm(Rpm(10.0));
        config.steps_per_revolution = 0;

        assert_eq!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
        );
    }
}
