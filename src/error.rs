//! Unified error types for the garage door controller.
//!
//! Every fallible operation funnels into [`Error`], keeping the driver
//! loop's error handling uniform.  All variants are `Copy`: HAL errors are
//! reduced to their portable `ErrorKind` so that the concrete pin types
//! never leak into the controller's signatures.

use core::fmt;

use embedded_hal::{digital, pwm};

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO read or write failed.
    Gpio(digital::ErrorKind),
    /// The motor speed (PWM) line rejected a duty-cycle write.
    Pwm(pwm::ErrorKind),
    /// The door is jammed; motion commands are refused until reset.
    Halted,
    /// Configuration failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(kind) => write!(f, "gpio: {kind}"),
            Self::Pwm(kind) => write!(f, "pwm: {kind}"),
            Self::Halted => write!(f, "door halted after a jam"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// HAL error mapping
// ---------------------------------------------------------------------------

/// Reduce a pin error to its portable kind.
pub(crate) fn gpio<E: digital::Error>(e: E) -> Error {
    Error::Gpio(e.kind())
}

/// Reduce a PWM error to its portable kind.
pub(crate) fn pwm<E: pwm::Error>(e: E) -> Error {
    Error::Pwm(e.kind())
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
