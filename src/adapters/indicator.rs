//! Lamp-line adapter — drives the three indicator outputs.
//!
//! Generic over [`OutputPin`] so host tests can substitute plain mock
//! pins for the downgraded AVR port pins used on the target.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::commands::LampPattern;
use crate::app::ports::IndicatorPort;

/// Concrete adapter holding the three lamp output lines.
pub struct GpioIndicator<P: OutputPin> {
    red: P,
    amber: P,
    green: P,
    current: LampPattern,
}

impl<P: OutputPin> GpioIndicator<P> {
    pub fn new(red: P, amber: P, green: P) -> Self {
        Self {
            red,
            amber,
            green,
            current: LampPattern::OFF,
        }
    }

    /// Pattern most recently written to the pins.
    pub fn current(&self) -> LampPattern {
        self.current
    }
}

impl<P: OutputPin> IndicatorPort for GpioIndicator<P> {
    fn apply(&mut self, pattern: LampPattern) {
        // Pin errors are Infallible on the target; writes are best-effort.
        self.red.set_state(PinState::from(pattern.red)).ok();
        self.amber.set_state(PinState::from(pattern.amber)).ok();
        self.green.set_state(PinState::from(pattern.green)).ok();
        self.current = pattern;
    }
}
