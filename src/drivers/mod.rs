//! GPIO-level drivers: limit-switch inputs, indicator LEDs, and the motor.

pub mod indicators;
pub mod input;
pub mod led;
pub mod motor;

#[cfg(test)]
pub(crate) mod mock;
