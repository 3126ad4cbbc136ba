//! Simulated hardware for integration tests.
//!
//! Every pin shares its level through `Rc<Cell<_>>`: the test keeps one
//! handle to drive or inspect while the controller owns the other.  The
//! motor is the real [`HBridgeMotor`] on top of a simulated direction pin
//! and PWM channel, so the whole stack below the service is exercised.

#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{self, InputPin, OutputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};

use garagedoor::app::events::AppEvent;
use garagedoor::app::ports::{Clock, EventSink};
use garagedoor::app::service::GarageService;
use garagedoor::config::DoorConfig;
use garagedoor::door::DoorEvent;
use garagedoor::drivers::indicators::IndicatorPair;
use garagedoor::drivers::led::BiLed;
use garagedoor::drivers::motor::HBridgeMotor;

// ── Pins ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SimInput(Rc<Cell<bool>>);

impl SimInput {
    pub fn set_high(&self, high: bool) {
        self.0.set(high);
    }
}

impl digital::ErrorType for SimInput {
    type Error = Infallible;
}

impl InputPin for SimInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

#[derive(Clone, Default)]
pub struct SimOutput(Rc<Cell<bool>>);

impl SimOutput {
    pub fn is_high(&self) -> bool {
        self.0.get()
    }
}

impl digital::ErrorType for SimOutput {
    type Error = Infallible;
}

impl OutputPin for SimOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// 8-bit PWM channel.
#[derive(Clone, Default)]
pub struct SimPwm(Rc<Cell<u16>>);

impl SimPwm {
    pub fn duty(&self) -> u16 {
        self.0.get()
    }
}

impl pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.0.set(duty);
        Ok(())
    }
}

// ── Clock / sink ──────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u32>>);

impl ManualClock {
    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn door_events(&self) -> Vec<DoorEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Door(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub type Motor = HBridgeMotor<SimOutput, SimPwm>;
pub type Service = GarageService<SimInput, Motor, SimOutput, ManualClock>;

/// Handles to every simulated line around one service.
pub struct Garage {
    pub closed_switch: SimInput,
    pub open_switch: SimInput,
    pub motor_dir: SimOutput,
    pub motor_pwm: SimPwm,
    pub red: SimOutput,
    pub green: SimOutput,
    pub clock: ManualClock,
    pub sink: RecordingSink,
    pub service: Service,
}

impl Garage {
    /// `closed`/`open`: whether each limit switch is pressed at power-up.
    pub fn new(closed: bool, open: bool) -> Self {
        Self::with_config(DoorConfig::default(), closed, open)
    }

    pub fn with_config(config: DoorConfig, closed: bool, open: bool) -> Self {
        let closed_switch = SimInput::default();
        closed_switch.set_high(closed);
        let open_switch = SimInput::default();
        open_switch.set_high(open);
        let motor_dir = SimOutput::default();
        let motor_pwm = SimPwm::default();
        let red = SimOutput::default();
        let green = SimOutput::default();
        let clock = ManualClock::default();

        let motor = HBridgeMotor::new(motor_dir.clone(), motor_pwm.clone()).unwrap();
        let leds = IndicatorPair::new(
            BiLed::new(red.clone(), PinState::Low).unwrap(),
            BiLed::new(green.clone(), PinState::Low).unwrap(),
        );
        let mut sink = RecordingSink::default();
        let mut service = GarageService::new(
            config,
            closed_switch.clone(),
            open_switch.clone(),
            motor,
            leds,
            clock.clone(),
        )
        .unwrap();
        service.start(&mut sink).unwrap();

        Self {
            closed_switch,
            open_switch,
            motor_dir,
            motor_pwm,
            red,
            green,
            clock,
            sink,
            service,
        }
    }

    pub fn motor_on(&self) -> bool {
        self.motor_pwm.duty() > 0
    }

    /// Run the loop every `step_ms` for `total_ms`.
    pub fn run_for(&mut self, total_ms: u32, step_ms: u32) {
        let mut elapsed = 0;
        while elapsed < total_ms {
            self.clock.advance(step_ms);
            self.service.tick(&mut self.sink).unwrap();
            elapsed += step_ms;
        }
    }
}
