//! Red/green indicator pair with optional mirroring.
//!
//! The pair owns both [`BiLed`]s plus one mirror flag per LED.  When an
//! LED's flag is set it *leads*: every explicit `on`/`off`/`blink` and every
//! blink toggle on it is pushed to the peer as the opposite discrete state,
//! on the same call.
//!
//! ```text
//!          mirrors[Red]
//!   Red ───────────────▶ Green      (push: !red.lit)
//!   Red ◀─────────────── Green      (push: !green.lit)
//!          mirrors[Green]
//! ```
//!
//! Both flags may be set at once.  A push forces the peer's state directly
//! and never propagates back, so the 2-cycle cannot ping-pong.

use embedded_hal::digital::OutputPin;

use super::led::{BiLed, FAST_BLINK_MS, LedMode, SLOW_BLINK_MS};
use crate::error::Result;

/// Which LED of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Indicator {
    /// Door-closed indicator.
    Red = 0,
    /// Door-open indicator.
    Green = 1,
}

impl Indicator {
    pub fn peer(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Red,
        }
    }
}

pub struct IndicatorPair<P> {
    /// Indexed by `Indicator as usize`.
    leds: [BiLed<P>; 2],
    /// `mirrors[i]`: LED `i` pushes its inverse to its peer.
    mirrors: [bool; 2],
}

impl<P: OutputPin> IndicatorPair<P> {
    pub fn new(red: BiLed<P>, green: BiLed<P>) -> Self {
        Self {
            leds: [red, green],
            mirrors: [false, false],
        }
    }

    pub fn led(&self, which: Indicator) -> &BiLed<P> {
        &self.leds[which as usize]
    }

    pub fn mode(&self, which: Indicator) -> LedMode {
        self.led(which).mode()
    }

    pub fn is_lit(&self, which: Indicator) -> bool {
        self.led(which).is_lit()
    }

    pub fn has_opposite(&self, which: Indicator) -> bool {
        self.mirrors[which as usize]
    }

    pub fn on(&mut self, which: Indicator) -> Result<()> {
        self.split(which).0.on()?;
        self.push(which)
    }

    pub fn off(&mut self, which: Indicator) -> Result<()> {
        self.split(which).0.off()?;
        self.push(which)
    }

    pub fn blink(&mut self, which: Indicator, period_ms: u32, now_ms: u32) -> Result<()> {
        self.split(which).0.blink(period_ms, now_ms)?;
        self.push(which)
    }

    pub fn slow_blink(&mut self, which: Indicator, now_ms: u32) -> Result<()> {
        self.blink(which, SLOW_BLINK_MS, now_ms)
    }

    pub fn fast_blink(&mut self, which: Indicator, now_ms: u32) -> Result<()> {
        self.blink(which, FAST_BLINK_MS, now_ms)
    }

    /// Make `leader`'s peer mirror it, snapping the peer to the inverse of
    /// `leader`'s current output immediately.
    pub fn set_opposite(&mut self, leader: Indicator) -> Result<()> {
        self.mirrors[leader as usize] = true;
        self.push(leader)
    }

    /// Stop mirroring from `leader`.  The peer keeps its current output.
    pub fn remove_opposite(&mut self, leader: Indicator) {
        self.mirrors[leader as usize] = false;
    }

    /// Advance both blink cadences, pushing each toggle to a mirrored peer.
    pub fn interact(&mut self, now_ms: u32) -> Result<()> {
        for which in [Indicator::Red, Indicator::Green] {
            let toggled = self.split(which).0.interact(now_ms)?;
            if toggled.is_some() {
                self.push(which)?;
            }
        }
        Ok(())
    }

    /// Give back both LEDs as `(red, green)`.
    pub fn release(self) -> (BiLed<P>, BiLed<P>) {
        let [red, green] = self.leds;
        (red, green)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Force the peer of `which` to the inverse of `which`'s output, if
    /// `which` leads.
    fn push(&mut self, which: Indicator) -> Result<()> {
        if !self.mirrors[which as usize] {
            return Ok(());
        }
        let (led, peer) = self.split(which);
        peer.set(!led.is_lit())
    }

    fn split(&mut self, which: Indicator) -> (&mut BiLed<P>, &mut BiLed<P>) {
        let [red, green] = &mut self.leds;
        match which {
            Indicator::Red => (red, green),
            Indicator::Green => (green, red),
        }
    }
}
