//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade (the ESP-IDF logger on target, UART / USB-CDC in production).

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::door::DoorEvent;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::Door(DoorEvent::LimitPressed(limit)) => {
                info!("LIMIT | {:?} switch pressed", limit);
            }
            AppEvent::Door(DoorEvent::StateChanged { from, to }) => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Door(DoorEvent::Jammed { during, elapsed_ms }) => {
                error!("JAM   | while {:?}, {} ms without reaching a limit", during, elapsed_ms);
            }
            AppEvent::CommandRejected(cmd) => {
                warn!("REJECT| {:?} (door halted)", cmd);
            }
        }
    }
}
