//! Polled, debounced digital input with press-edge detection.
//!
//! ## Hardware
//!
//! A limit switch or push-button on a pulled-up GPIO.  Nothing is
//! interrupt-driven: the driver loop calls [`DigitalInput::interact`] every
//! cycle with the current monotonic time, and the debounce runs purely on
//! elapsed-time checks.
//!
//! ## Debounce
//!
//! Any change of the raw sample restarts the debounce timer.  Once the raw
//! sample has held for more than [`DEBOUNCE_MS`], it is committed as the
//! stable level.  A commit *into* the pressed level is reported as
//! [`Edge::Pressed`]; releases are committed silently.

use log::debug;

use embedded_hal::digital::InputPin;

use crate::error::{self, Result};

pub const DEBOUNCE_MS: u32 = 50;

/// Which electrical level means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// HIGH = pressed (normally-closed switch to a pulled-up input).
    ActiveHigh,
    /// LOW = pressed (normally-open switch shorting to ground).
    ActiveLow,
}

impl Polarity {
    /// Map the classic "normally closed" wiring flag onto a polarity.
    pub fn from_normally_closed(normally_closed: bool) -> Self {
        if normally_closed {
            Self::ActiveHigh
        } else {
            Self::ActiveLow
        }
    }

    /// The raw level (`true` = HIGH) that reads as pressed.
    pub fn pressed_level(self) -> bool {
        matches!(self, Self::ActiveHigh)
    }
}

/// Debounced transitions reported by [`DigitalInput::interact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
}

pub struct DigitalInput<P> {
    pin: P,
    polarity: Polarity,
    label: &'static str,
    /// Debounced level; `None` until the first commit or probe.
    stable: Option<bool>,
    /// Raw level seen on the previous call.
    last_raw: Option<bool>,
    last_change_ms: u32,
}

impl<P: InputPin> DigitalInput<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            label: "input",
            stable: None,
            last_raw: None,
            last_change_ms: 0,
        }
    }

    /// Name used in log lines.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Last debounced level interpreted per polarity.  No side effects.
    pub fn is_pressed(&self) -> bool {
        self.stable == Some(self.polarity.pressed_level())
    }

    /// Last debounced raw level (`true` = HIGH), if one has been committed.
    pub fn stable_level(&self) -> Option<bool> {
        self.stable
    }

    /// Sample once and adopt the reading as the stable level without
    /// debouncing or reporting an edge.  Used to seed state at start-up.
    pub fn probe(&mut self, now_ms: u32) -> Result<bool> {
        let raw = self.pin.is_high().map_err(error::gpio)?;
        self.stable = Some(raw);
        self.last_raw = Some(raw);
        self.last_change_ms = now_ms;
        Ok(self.is_pressed())
    }

    /// Call once per cycle.  Returns [`Edge::Pressed`] on the cycle the
    /// debounced level enters the pressed state.
    pub fn interact(&mut self, now_ms: u32) -> Result<Option<Edge>> {
        let raw = self.pin.is_high().map_err(error::gpio)?;
        if self.last_raw != Some(raw) {
            self.last_change_ms = now_ms;
        }

        let mut edge = None;
        if now_ms.wrapping_sub(self.last_change_ms) > DEBOUNCE_MS && self.stable != Some(raw) {
            self.stable = Some(raw);
            if self.is_pressed() {
                debug!("{}: pressed", self.label);
                edge = Some(Edge::Pressed);
            } else {
                debug!("{}: released", self.label);
            }
        }

        self.last_raw = Some(raw);
        Ok(edge)
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}
