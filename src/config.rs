//! Door controller configuration parameters
//!
//! Tunables for travel supervision and motor drive.  Debounce and blink
//! cadences are fixed by the drivers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Core door configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorConfig {
    /// Maximum travel time (ms) before the door is declared jammed
    pub jam_timeout_ms: u32,
    /// Motor drive level while opening/closing (1-100%)
    pub motor_speed_percent: u8,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            jam_timeout_ms: 120_000, // 2 minutes
            motor_speed_percent: 100,
        }
    }
}

impl DoorConfig {
    /// Reject values that would make the controller unsafe or inert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jam_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "jam_timeout_ms must be non-zero",
            ));
        }
        if !(1..=100).contains(&self.motor_speed_percent) {
            return Err(ConfigError::ValidationFailed(
                "motor_speed_percent must be within 1..=100",
            ));
        }
        Ok(())
    }
}

/// Errors from [`DoorConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
