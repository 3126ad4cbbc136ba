//! Outbound application events.
//!
//! The [`GarageService`](super::service::GarageService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use serde::Serialize;

use super::commands::DoorCommand;
use crate::door::{DoorEvent, DoorState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AppEvent {
    /// The service has started (carries the seeded door state).
    Started(DoorState),

    /// Something happened inside the door controller.
    Door(DoorEvent),

    /// A motion command arrived while the door is halted.
    CommandRejected(DoorCommand),
}
