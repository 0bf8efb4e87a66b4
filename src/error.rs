//! Error types for blinds-stepper.
//!
//! Provides unified error handling across configuration, motor control, and
//! persistence of the position and network records.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all blinds-stepper operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Reading or writing a persisted record failed
    Storage(StorageError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// RPM must be finite and > 0
    InvalidRpm(f32),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u16),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Percent outside 0..=100
    InvalidPercent(u8),
    /// Target position falls outside `[0, max_steps]`
    LimitExceeded {
        /// Requested target position in steps
        position: i32,
        /// Limit that was exceeded (0 or max_steps)
        limit: i32,
    },
}

/// Persistence errors raised by a [`ConfigStore`](crate::store::ConfigStore).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The record has never been saved
    NotFound(&'static str),
    /// Opening, reading or writing the backing storage failed
    Io(heapless::String<128>),
    /// The stored document could not be decoded
    Deserialize(heapless::String<128>),
    /// The record could not be encoded
    Serialize(heapless::String<128>),
}

impl StorageError {
    /// Build an I/O error from any displayable message, truncating to capacity.
    pub fn io(msg: impl fmt::Display) -> Self {
        StorageError::Io(truncated(msg))
    }

    /// Build a decode error from any displayable message.
    pub fn deserialize(msg: impl fmt::Display) -> Self {
        StorageError::Deserialize(truncated(msg))
    }

    /// Build an encode error from any displayable message.
    pub fn serialize(msg: impl fmt::Display) -> Self {
        StorageError::Serialize(truncated(msg))
    }
}

/// Render `msg` into a fixed-capacity string, dropping whatever does not fit.
pub(crate) fn truncated<const N: usize>(msg: impl fmt::Display) -> heapless::String<N> {
    struct Truncate<'a, const N: usize>(&'a mut heapless::String<N>);

    impl<const N: usize> fmt::Write for Truncate<'_, N> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for c in s.chars() {
                if self.0.push(c).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    let mut out = heapless::String::new();
    let _ = fmt::write(&mut Truncate(&mut out), format_args!("{}", msg));
    out
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidRpm(v) => write!(f, "Invalid rpm: {}. Must be > 0", v),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::InvalidPercent(p) => write!(f, "Invalid percent: {}. Must be 0-100", p),
            MotorError::LimitExceeded { position, limit } => {
                write!(f, "Position {} exceeds limit {}", position, limit)
            }
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(record) => write!(f, "No saved {} record", record),
            StorageError::Io(msg) => write!(f, "I/O failure: {}", msg),
            StorageError::Deserialize(msg) => write!(f, "Failed to decode record: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Failed to encode record: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}
