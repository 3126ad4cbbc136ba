//! Single-GPIO indicator LED with on, off, and blink modes.
//!
//! Blinking uses the same elapsed-time polling as the inputs: the driver
//! loop calls [`BiLed::interact`] each cycle and the LED toggles once
//! `period_ms` has passed since the last toggle.  No blocking waits.
//!
//! A `BiLed` knows nothing about other LEDs.  Mirroring a second LED is the
//! job of [`IndicatorPair`](super::indicators::IndicatorPair).

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{self, Result};

/// Half-period for the "in motion" cadence.
pub const SLOW_BLINK_MS: u32 = 1000;
/// Half-period for the "manual override" cadence.
pub const FAST_BLINK_MS: u32 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    Off,
    On,
    Blinking { period_ms: u32 },
}

pub struct BiLed<P> {
    pin: P,
    mode: LedMode,
    /// Current physical output.
    lit: bool,
    last_toggle_ms: u32,
}

impl<P: OutputPin> BiLed<P> {
    /// Take ownership of `pin` and drive it to `initial`.
    pub fn new(mut pin: P, initial: PinState) -> Result<Self> {
        pin.set_state(initial).map_err(error::gpio)?;
        let lit = initial == PinState::High;
        Ok(Self {
            pin,
            mode: if lit { LedMode::On } else { LedMode::Off },
            lit,
            last_toggle_ms: 0,
        })
    }

    pub fn mode(&self) -> LedMode {
        self.mode
    }

    /// Physical output level.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn is_blinking(&self) -> bool {
        matches!(self.mode, LedMode::Blinking { .. })
    }

    /// Solid on; cancels blinking.
    pub fn on(&mut self) -> Result<()> {
        self.drive(true)?;
        self.mode = LedMode::On;
        Ok(())
    }

    /// Solid off; cancels blinking.
    pub fn off(&mut self) -> Result<()> {
        self.drive(false)?;
        self.mode = LedMode::Off;
        Ok(())
    }

    /// Force the discrete on/off state matching `lit`.
    pub fn set(&mut self, lit: bool) -> Result<()> {
        if lit { self.on() } else { self.off() }
    }

    /// Start blinking, beginning in the off phase at `now_ms`.
    pub fn blink(&mut self, period_ms: u32, now_ms: u32) -> Result<()> {
        self.drive(false)?;
        self.mode = LedMode::Blinking { period_ms };
        self.last_toggle_ms = now_ms;
        Ok(())
    }

    pub fn slow_blink(&mut self, now_ms: u32) -> Result<()> {
        self.blink(SLOW_BLINK_MS, now_ms)
    }

    pub fn fast_blink(&mut self, now_ms: u32) -> Result<()> {
        self.blink(FAST_BLINK_MS, now_ms)
    }

    /// Advance the blink cadence.  Returns the new output level when the LED
    /// toggled on this call, `None` otherwise (including when not blinking).
    pub fn interact(&mut self, now_ms: u32) -> Result<Option<bool>> {
        let LedMode::Blinking { period_ms } = self.mode else {
            return Ok(None);
        };
        if now_ms.wrapping_sub(self.last_toggle_ms) < period_ms {
            return Ok(None);
        }
        let next = !self.lit;
        self.drive(next)?;
        self.last_toggle_ms = now_ms;
        Ok(Some(next))
    }

    fn drive(&mut self, lit: bool) -> Result<()> {
        self.pin
            .set_state(PinState::from(lit))
            .map_err(error::gpio)?;
        self.lit = lit;
        Ok(())
    }
}
