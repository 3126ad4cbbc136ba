//! Garage door controller library.
//!
//! Two normally-closed limit switches, a red/green indicator pair and a
//! reversible motor, driven from a single polling loop:
//!
//! ```text
//!   adapters ──▶ app::GarageService ──▶ door::DoorController ──▶ drivers
//!   (clock, log)   (cycle + commands)     (FSM + jam watch)     (pins)
//! ```
//!
//! Pins are taken through `embedded-hal` 1.0 traits, so the whole stack runs
//! on the host against mock pins.  Only [`adapters::time`] touches ESP-IDF,
//! behind `#[cfg(target_os = "espidf")]`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod door;
pub mod drivers;
pub mod error;

pub use error::{Error, Result};
