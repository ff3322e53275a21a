//! Debounced push-button input.

use crate::gpio::{DigitalIo, Level, Pin};
use crate::time::Clock;

/// Settle window after a detected press edge.
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

/// Per-button press edge detector with a blocking settle delay.
///
/// Buttons are wired active-low (pull-up, switch to ground), so a low sample
/// reads as pressed. A press is reported exactly once per physical
/// actuation, on the released-to-pressed transition; the poll that detects
/// the edge blocks for [`DEBOUNCE_WINDOW_MS`] so the mechanical bounce has
/// settled before the line is sampled again.
///
/// Paying the delay at read time keeps debouncing out of the timer
/// machinery; the trade-off is that a poll reporting a press takes the full
/// settle window to return.
pub struct DebouncedButton {
    pin: Pin,
    was_pressed: bool,
}

impl DebouncedButton {
    /// Creates a detector for the given pin, initially released.
    pub const fn new(pin: Pin) -> Self {
        Self {
            pin,
            was_pressed: false,
        }
    }

    /// The pin this button samples.
    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Samples the button and reports a press edge.
    ///
    /// The stored previous level is updated on every call, pressed or not,
    /// so a button held down reports `true` only on the transition and never
    /// again until it is released and pressed anew.
    pub fn poll<Io: DigitalIo, C: Clock>(&mut self, io: &Io, clock: &C) -> bool {
        let pressed = io.read(self.pin).is_low();
        let edge = pressed && !self.was_pressed;

        if edge {
            clock.sleep_ms(DEBOUNCE_WINDOW_MS);
        }

        self.was_pressed = pressed;
        edge
    }
}
