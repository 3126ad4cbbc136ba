//! Events reported by [`DoorController::interact`](super::DoorController::interact).
//!
//! These replace callbacks: the controller never calls out while it is
//! mid-update, it hands the caller a list of what happened this cycle.

use serde::Serialize;

use super::{DoorState, Limit};

/// At most: two switch edges, one transition, one jam.
pub const MAX_EVENTS_PER_CYCLE: usize = 4;

pub type DoorEvents = heapless::Vec<DoorEvent, MAX_EVENTS_PER_CYCLE>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoorEvent {
    /// A limit switch's debounced level just entered "pressed".
    LimitPressed(Limit),

    /// The state machine moved between states.
    StateChanged { from: DoorState, to: DoorState },

    /// Travel exceeded the jam timeout; the door is now `Halted`.
    /// Emitted exactly once per jam.
    Jammed { during: DoorState, elapsed_ms: u32 },
}

/// Result of an open/close command that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Motion started towards the requested limit.
    Started,
    /// Already there or already heading there; nothing changed.
    AlreadyUnderway,
}
