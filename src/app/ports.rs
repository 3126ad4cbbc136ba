//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GarageService (domain)
//! ```
//!
//! Pins reach the domain through the `embedded-hal` traits and the
//! [`MotorDriver`](crate::drivers::motor::MotorDriver) contract.  What is
//! left is time and somewhere to send events.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: platform timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; every consumer
/// compares instants with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
