//! Application core: the driver-loop cycle around the door controller.
//!
//! All I/O flows through **port traits** defined in [`ports`]; the service
//! itself only sequences one cycle and translates commands, so it runs
//! under test with mock pins and a manual clock.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
