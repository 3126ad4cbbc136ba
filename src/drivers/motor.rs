//! Door motor driver (H-bridge: direction line + PWM speed line).
//!
//! The controller only depends on the [`MotorDriver`] contract: `start`
//! begins continuous motion, `stop` halts it and is safe to repeat.  The
//! controller never issues `start` to a running motor.
//!
//! [`HBridgeMotor`] is the concrete implementation: a digital direction pin
//! (HIGH = forward/opening, LOW = backward/closing) and a PWM channel whose
//! duty sets the speed.  It is a dumb actuator; jam supervision lives in the
//! door controller.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{self, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Opens the door.
    Forward,
    /// Closes the door.
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    Running { speed: u8, direction: Direction },
}

/// Two-wire on/off motor contract.
pub trait MotorDriver {
    /// Begin continuous motion at `speed` percent (1-100).
    fn start(&mut self, direction: Direction, speed: u8) -> Result<()>;

    /// Halt motion.  Safe to call when already stopped.
    fn stop(&mut self) -> Result<()>;

    fn is_running(&self) -> bool;
}

pub struct HBridgeMotor<D, S> {
    direction_pin: D,
    speed_pwm: S,
    state: MotorState,
}

impl<D: OutputPin, S: SetDutyCycle> HBridgeMotor<D, S> {
    /// Take both lines and force the speed line fully off.
    pub fn new(direction_pin: D, mut speed_pwm: S) -> Result<Self> {
        speed_pwm.set_duty_cycle_fully_off().map_err(error::pwm)?;
        Ok(Self {
            direction_pin,
            speed_pwm,
            state: MotorState::Stopped,
        })
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Give both lines back.
    pub fn release(self) -> (D, S) {
        (self.direction_pin, self.speed_pwm)
    }
}

impl<D: OutputPin, S: SetDutyCycle> MotorDriver for HBridgeMotor<D, S> {
    fn start(&mut self, direction: Direction, speed: u8) -> Result<()> {
        let speed = speed.min(100);
        if speed == 0 {
            return self.stop();
        }

        let level = PinState::from(matches!(direction, Direction::Forward));
        self.direction_pin.set_state(level).map_err(error::gpio)?;
        self.speed_pwm
            .set_duty_cycle_percent(speed)
            .map_err(error::pwm)?;

        self.state = MotorState::Running { speed, direction };
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.speed_pwm
            .set_duty_cycle_fully_off()
            .map_err(error::pwm)?;
        self.state = MotorState::Stopped;
        Ok(())
    }

    fn is_running(&self) -> bool {
        !matches!(self.state, MotorState::Stopped)
    }
}
