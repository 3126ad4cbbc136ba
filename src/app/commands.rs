//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (wall button,
//! remote, automation timer) that the
//! [`GarageService`](super::service::GarageService) applies to the door.

use serde::{Deserialize, Serialize};

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorCommand {
    /// Drive the door open.  `manual` marks a person-initiated move.
    Open { manual: bool },

    /// Drive the door closed.
    Close { manual: bool },

    /// Clear the manual override and re-show the resting indicator.
    AutoCloseOn,

    /// Emergency stop: motor and both indicators off.
    Stop,
}
