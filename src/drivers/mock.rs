//! In-memory pins for driver unit tests.
//!
//! Each mock shares its level through an `Rc<Cell<_>>`, so a test keeps one
//! handle to poke or inspect while the driver under test owns the other.

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::drivers::motor::{Direction, MotorDriver};
use crate::error;

/// Input pin whose level the test drives.
#[derive(Clone, Default)]
pub struct MockInput {
    level: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new(high: bool) -> Self {
        Self {
            level: Rc::new(Cell::new(high)),
        }
    }

    pub fn set_high(&self, high: bool) {
        self.level.set(high);
    }
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// Output pin that remembers its level and how many writes it saw.
#[derive(Clone, Default)]
pub struct MockOutput {
    level: Rc<Cell<bool>>,
    writes: Rc<Cell<u32>>,
}

impl MockOutput {
    pub fn is_high(&self) -> bool {
        self.level.get()
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }

    fn write(&self, high: bool) {
        self.level.set(high);
        self.writes.set(self.writes.get() + 1);
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

/// PWM channel with a 0..=255 duty range.
#[derive(Clone, Default)]
pub struct MockPwm {
    duty: Rc<Cell<u16>>,
}

impl MockPwm {
    pub fn duty(&self) -> u16 {
        self.duty.get()
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty.set(duty);
        Ok(())
    }
}

/// Input pin that always fails, for error-path tests.
pub struct FaultyInput;

impl ErrorType for FaultyInput {
    type Error = embedded_hal::digital::ErrorKind;
}

impl InputPin for FaultyInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(embedded_hal::digital::ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(embedded_hal::digital::ErrorKind::Other)
    }
}

/// Motor that records every command and rejects `start` while running.
#[derive(Clone, Default)]
pub struct MockMotor {
    running: Rc<Cell<Option<(Direction, u8)>>>,
    starts: Rc<Cell<u32>>,
    stops: Rc<Cell<u32>>,
}

impl MockMotor {
    pub fn running(&self) -> Option<(Direction, u8)> {
        self.running.get()
    }

    pub fn starts(&self) -> u32 {
        self.starts.get()
    }

    pub fn stops(&self) -> u32 {
        self.stops.get()
    }
}

impl MotorDriver for MockMotor {
    fn start(&mut self, direction: Direction, speed: u8) -> error::Result<()> {
        assert!(self.running.get().is_none(), "start issued to a running motor");
        self.running.set(Some((direction, speed)));
        self.starts.set(self.starts.get() + 1);
        Ok(())
    }

    fn stop(&mut self) -> error::Result<()> {
        self.running.set(None);
        self.stops.set(self.stops.get() + 1);
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.get().is_some()
    }
}
