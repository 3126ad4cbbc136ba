//! Door state machine with limit-switch detection and jam protection.
//!
//! ```text
//!               open_door                 open limit pressed
//!   Unknown ───────────────▶ OPENING ───────────────────────▶ OPEN
//!   Closed  ───────────────▶    │  ▲                            │
//!                               │  │ open_door                  │ close_door
//!                   close_door  ▼  │                            ▼
//!   CLOSED ◀──────────────── CLOSING ◀──────────────────────────┘
//!         closed limit pressed
//!
//!   OPENING / CLOSING ──[travel > jam timeout]──▶ HALTED (terminal)
//! ```
//!
//! Each cycle [`DoorController::interact`] polls both limit switches first,
//! then evaluates the current state with those same-cycle readings.  The
//! motor runs exactly while the state is `Opening` or `Closing`, apart from
//! an explicit [`DoorController::stop`].
//!
//! Indicators are not owned by the controller; every call that may change
//! them borrows the [`IndicatorPair`] for the duration of the call.

pub mod events;

use embedded_hal::digital::{InputPin, OutputPin};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::DoorConfig;
use crate::drivers::indicators::{Indicator, IndicatorPair};
use crate::drivers::input::{DigitalInput, Edge, Polarity};
use crate::drivers::motor::{Direction, MotorDriver};
use crate::error::{Error, Result};

pub use events::{CommandOutcome, DoorEvent, DoorEvents};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DoorState {
    /// Neither limit switch was pressed at start-up.
    Unknown = 0,
    Open = 1,
    Opening = 2,
    Closed = 3,
    Closing = 4,
    /// Jammed.  Terminal until the controller is rebuilt.
    Halted = 5,
}

impl DoorState {
    pub fn is_moving(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// One end of the door's travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Limit {
    Open,
    Closed,
}

impl Limit {
    /// State while travelling towards this limit.
    pub fn travel_state(self) -> DoorState {
        match self {
            Self::Open => DoorState::Opening,
            Self::Closed => DoorState::Closing,
        }
    }

    /// State once this limit is reached.
    pub fn resting_state(self) -> DoorState {
        match self {
            Self::Open => DoorState::Open,
            Self::Closed => DoorState::Closed,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Open => Direction::Forward,
            Self::Closed => Direction::Backward,
        }
    }

    /// LED that reports this end: green for open, red for closed.
    pub fn indicator(self) -> Indicator {
        match self {
            Self::Open => Indicator::Green,
            Self::Closed => Indicator::Red,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

pub struct DoorController<I, M> {
    config: DoorConfig,
    closed_switch: DigitalInput<I>,
    open_switch: DigitalInput<I>,
    motor: M,
    state: DoorState,
    /// Valid only while `Opening`/`Closing`.
    motion_started_ms: u32,
    /// Last open/close came from a person rather than automation.
    manual_override: bool,
}

impl<I: InputPin, M: MotorDriver> DoorController<I, M> {
    /// Build the controller and seed a best-guess state from the limit
    /// switches: `Closed` if the closed switch reads pressed, `Open` if the
    /// open switch does (open wins if both do), else `Unknown`.
    ///
    /// Both switches are normally-closed.  The motor is stopped and the
    /// indicators are left alone until [`refresh_indicators`] or a command.
    ///
    /// [`refresh_indicators`]: Self::refresh_indicators
    pub fn new(config: DoorConfig, closed_pin: I, open_pin: I, mut motor: M, now_ms: u32) -> Result<Self> {
        config.validate()?;

        let polarity = Polarity::from_normally_closed(true);
        let mut closed_switch = DigitalInput::new(closed_pin, polarity).with_label("closed-limit");
        let mut open_switch = DigitalInput::new(open_pin, polarity).with_label("open-limit");

        let mut state = DoorState::Unknown;
        if closed_switch.probe(now_ms)? {
            state = DoorState::Closed;
        }
        if open_switch.probe(now_ms)? {
            state = DoorState::Open;
        }

        motor.stop()?;
        info!("Door starting in state: {:?}", state);

        Ok(Self {
            config,
            closed_switch,
            open_switch,
            motor,
            state,
            motion_started_ms: now_ms,
            manual_override: false,
        })
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn config(&self) -> &DoorConfig {
        &self.config
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn manual_override(&self) -> bool {
        self.manual_override
    }

    pub fn is_open_or_opening(&self) -> bool {
        matches!(self.state, DoorState::Open | DoorState::Opening)
    }

    pub fn is_closed_or_closing(&self) -> bool {
        matches!(self.state, DoorState::Closed | DoorState::Closing)
    }

    pub fn is_halted(&self) -> bool {
        self.state == DoorState::Halted
    }

    /// Debounced reading of one limit switch.
    pub fn is_pressed(&self, limit: Limit) -> bool {
        self.switch(limit).is_pressed()
    }

    /// Time since the motor was started, while travelling.
    pub fn motion_elapsed_ms(&self, now_ms: u32) -> Option<u32> {
        self.state
            .is_moving()
            .then(|| now_ms.wrapping_sub(self.motion_started_ms))
    }

    // ── Commands ──────────────────────────────────────────────

    /// Drive towards the open limit unless already open or opening.
    pub fn open_door<P: OutputPin>(
        &mut self,
        manual: bool,
        now_ms: u32,
        leds: &mut IndicatorPair<P>,
    ) -> Result<CommandOutcome> {
        self.command_travel(Limit::Open, manual, now_ms, leds)
    }

    /// Drive towards the closed limit unless already closed or closing.
    pub fn close_door<P: OutputPin>(
        &mut self,
        manual: bool,
        now_ms: u32,
        leds: &mut IndicatorPair<P>,
    ) -> Result<CommandOutcome> {
        self.command_travel(Limit::Closed, manual, now_ms, leds)
    }

    /// Return to automatic mode and re-derive the LED presentation.
    /// Motor state is not touched.
    pub fn auto_close_on<P: OutputPin>(&mut self, now_ms: u32, leds: &mut IndicatorPair<P>) -> Result<()> {
        self.manual_override = false;
        self.refresh_indicators(now_ms, leds)
    }

    /// Emergency stop: motor off, both LEDs off.  The state is left as is.
    pub fn stop<P: OutputPin>(&mut self, leds: &mut IndicatorPair<P>) -> Result<()> {
        info!("Door stop requested in state {:?}", self.state);
        self.motor.stop()?;
        leds.off(Indicator::Red)?;
        leds.off(Indicator::Green)
    }

    /// Show the resting state: solid when automatic, fast blink when the
    /// last move was a manual override.  No-op unless `Open` or `Closed`.
    pub fn refresh_indicators<P: OutputPin>(&self, now_ms: u32, leds: &mut IndicatorPair<P>) -> Result<()> {
        let indicator = match self.state {
            DoorState::Open => Limit::Open.indicator(),
            DoorState::Closed => Limit::Closed.indicator(),
            _ => return Ok(()),
        };
        if self.manual_override {
            leds.fast_blink(indicator, now_ms)
        } else {
            leds.on(indicator)
        }
    }

    // ── Per-cycle update ──────────────────────────────────────

    /// Poll both limit switches, then advance the state machine.
    pub fn interact<P: OutputPin>(&mut self, now_ms: u32, leds: &mut IndicatorPair<P>) -> Result<DoorEvents> {
        let mut events = DoorEvents::new();

        if self.closed_switch.interact(now_ms)? == Some(Edge::Pressed) {
            record(&mut events, DoorEvent::LimitPressed(Limit::Closed));
        }
        if self.open_switch.interact(now_ms)? == Some(Edge::Pressed) {
            record(&mut events, DoorEvent::LimitPressed(Limit::Open));
        }

        match self.state {
            DoorState::Opening => self.supervise_travel(Limit::Open, now_ms, leds, &mut events)?,
            DoorState::Closing => self.supervise_travel(Limit::Closed, now_ms, leds, &mut events)?,
            _ => {}
        }

        Ok(events)
    }

    // ── Internal ──────────────────────────────────────────────

    fn switch(&self, limit: Limit) -> &DigitalInput<I> {
        match limit {
            Limit::Open => &self.open_switch,
            Limit::Closed => &self.closed_switch,
        }
    }

    fn command_travel<P: OutputPin>(
        &mut self,
        target: Limit,
        manual: bool,
        now_ms: u32,
        leds: &mut IndicatorPair<P>,
    ) -> Result<CommandOutcome> {
        if self.is_halted() {
            warn!("Door halted: refusing to move towards {:?}", target);
            return Err(Error::Halted);
        }
        if self.state == target.resting_state() || self.state == target.travel_state() {
            return Ok(CommandOutcome::AlreadyUnderway);
        }

        // Reversing mid-travel: never hand `start` to a running motor.
        if self.motor.is_running() {
            self.motor.stop()?;
        }
        self.motor
            .start(target.direction(), self.config.motor_speed_percent)?;

        let from = self.state;
        self.state = target.travel_state();
        self.motion_started_ms = now_ms;
        self.manual_override = manual;
        info!(
            "Door {:?} -> {:?} ({})",
            from,
            self.state,
            if manual { "manual" } else { "auto" }
        );

        leds.off(target.indicator().peer())?;
        leds.slow_blink(target.indicator(), now_ms)?;
        Ok(CommandOutcome::Started)
    }

    fn supervise_travel<P: OutputPin>(
        &mut self,
        target: Limit,
        now_ms: u32,
        leds: &mut IndicatorPair<P>,
        events: &mut DoorEvents,
    ) -> Result<()> {
        let from = self.state;

        if self.switch(target).is_pressed() {
            self.motor.stop()?;
            self.state = target.resting_state();
            info!("Door {:?} -> {:?}", from, self.state);
            record(events, DoorEvent::StateChanged { from, to: self.state });
            return self.refresh_indicators(now_ms, leds);
        }

        let elapsed_ms = now_ms.wrapping_sub(self.motion_started_ms);
        if elapsed_ms > self.config.jam_timeout_ms {
            self.motor.stop()?;
            self.state = DoorState::Halted;
            error!(
                "Door jammed: {:?} for {} ms without reaching {:?} limit, halting",
                from, elapsed_ms, target
            );
            record(events, DoorEvent::StateChanged { from, to: DoorState::Halted });
            record(events, DoorEvent::Jammed { during: from, elapsed_ms });
        }
        Ok(())
    }
}

fn record(events: &mut DoorEvents, event: DoorEvent) {
    if events.push(event).is_err() {
        warn!("Door event dropped: {:?}", event);
    }
}
