//! Application service: the hexagonal core.
//!
//! [`GarageService`] owns the door controller, the indicator pair and the
//! clock.  One call to [`GarageService::tick`] is one driver-loop cycle:
//!
//! ```text
//!   Clock ──▶ ┌──────────────────────────────────────┐ ──▶ EventSink
//!             │            GarageService              │
//!  switches ─▶│  limit switches → door FSM → LED tick │──▶ motor, LEDs
//!             └──────────────────────────────────────┘
//! ```
//!
//! The door runs before the LED tick so that an indicator reconfigured by
//! a transition starts its cadence on the same cycle.

use embedded_hal::digital::{InputPin, OutputPin};
use log::{info, warn};

use crate::config::DoorConfig;
use crate::door::{DoorController, DoorEvent, DoorState};
use crate::drivers::indicators::IndicatorPair;
use crate::drivers::motor::MotorDriver;
use crate::error::{Error, Result};

use super::commands::DoorCommand;
use super::events::AppEvent;
use super::ports::{Clock, EventSink};

pub struct GarageService<I, M, L, C> {
    door: DoorController<I, M>,
    leds: IndicatorPair<L>,
    clock: C,
}

impl<I, M, L, C> GarageService<I, M, L, C>
where
    I: InputPin,
    M: MotorDriver,
    L: OutputPin,
    C: Clock,
{
    /// Build the controller against the given pins.  Does not emit
    /// anything; call [`start`](Self::start) next.
    pub fn new(
        config: DoorConfig,
        closed_switch: I,
        open_switch: I,
        motor: M,
        leds: IndicatorPair<L>,
        clock: C,
    ) -> Result<Self> {
        let door = DoorController::new(config, closed_switch, open_switch, motor, clock.now_ms())?;
        Ok(Self { door, leds, clock })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the seeded resting state and announce it.
    pub fn start(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let now_ms = self.clock.now_ms();
        self.door.refresh_indicators(now_ms, &mut self.leds)?;
        sink.emit(&AppEvent::Started(self.door.state()));
        info!("GarageService started in {:?}", self.door.state());
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one cycle: limit switches → door state machine → LED blink ticks.
    pub fn tick(&mut self, sink: &mut impl EventSink) -> Result<()> {
        let now_ms = self.clock.now_ms();

        let events = self.door.interact(now_ms, &mut self.leds)?;
        for event in events {
            sink.emit(&AppEvent::Door(event));
        }

        self.leds.interact(now_ms)
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an external command.  Motion commands while halted are
    /// reported through the sink rather than failing the caller.
    pub fn handle(&mut self, command: DoorCommand, sink: &mut impl EventSink) -> Result<()> {
        let now_ms = self.clock.now_ms();
        let before = self.door.state();

        let outcome = match command {
            DoorCommand::Open { manual } => self.door.open_door(manual, now_ms, &mut self.leds).map(drop),
            DoorCommand::Close { manual } => self.door.close_door(manual, now_ms, &mut self.leds).map(drop),
            DoorCommand::AutoCloseOn => self.door.auto_close_on(now_ms, &mut self.leds),
            DoorCommand::Stop => self.door.stop(&mut self.leds),
        };

        match outcome {
            Err(Error::Halted) => {
                warn!("Command {:?} rejected: door halted", command);
                sink.emit(&AppEvent::CommandRejected(command));
                return Ok(());
            }
            other => other?,
        }

        let after = self.door.state();
        if after != before {
            sink.emit(&AppEvent::Door(DoorEvent::StateChanged {
                from: before,
                to: after,
            }));
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> DoorState {
        self.door.state()
    }

    pub fn is_halted(&self) -> bool {
        self.door.is_halted()
    }

    pub fn door(&self) -> &DoorController<I, M> {
        &self.door
    }

    pub fn indicators(&self) -> &IndicatorPair<L> {
        &self.leds
    }

    /// Mutable access for mirror wiring (`set_opposite`) at start-up.
    pub fn indicators_mut(&mut self) -> &mut IndicatorPair<L> {
        &mut self.leds
    }
}
