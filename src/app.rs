//! The cooperative main loop tying input, countdown, and display together.

use heapless::Vec;

use crate::button::DebouncedButton;
use crate::command::ButtonEvent;
use crate::countdown::CountdownTimer;
use crate::display::{DisplayFrame, DisplayMultiplexer};
use crate::gpio::{DigitalIo, Direction, Pin, Pull};
use crate::time::Clock;

/// Time slice spent on each digit before the loop moves on.
///
/// 2 ms per digit is an 8 ms frame, a 125 Hz refresh - comfortably above
/// the flicker-fusion threshold.
pub const MULTIPLEX_SLICE_US: u32 = 2_000;

/// Pin assignment for the four buttons and the display bus.
#[derive(Debug, Clone, Copy)]
pub struct BoardPins {
    pub select_button: Pin,
    pub increment_button: Pin,
    pub start_pause_button: Pin,
    pub reset_button: Pin,
    /// Segment lines a through g, then the decimal point.
    pub segment_pins: [Pin; 8],
    /// Digit enables, leftmost first.
    pub digit_pins: [Pin; 4],
}

/// The countdown application: one cooperative cycle of input, countdown,
/// and display, repeated forever.
///
/// All state lives in this context object; nothing is global. The clock is
/// borrowed so the same instance can be shared with other consumers, and so
/// tests can drive the loop on simulated time.
pub struct CountdownApp<'c, Io, C: Clock> {
    io: Io,
    clock: &'c C,
    buttons: [(DebouncedButton, ButtonEvent); 4],
    timer: CountdownTimer,
    display: DisplayMultiplexer,
}

impl<'c, Io: DigitalIo, C: Clock> CountdownApp<'c, Io, C> {
    /// Creates the application over its collaborators. Call
    /// [`init`](Self::init) before the first [`step`](Self::step).
    pub fn new(io: Io, clock: &'c C, pins: BoardPins) -> Self {
        Self {
            io,
            clock,
            buttons: [
                (DebouncedButton::new(pins.select_button), ButtonEvent::Select),
                (DebouncedButton::new(pins.increment_button), ButtonEvent::Increment),
                (DebouncedButton::new(pins.start_pause_button), ButtonEvent::StartPause),
                (DebouncedButton::new(pins.reset_button), ButtonEvent::Reset),
            ],
            timer: CountdownTimer::new(),
            display: DisplayMultiplexer::new(pins.segment_pins, pins.digit_pins),
        }
    }

    /// Configures the button inputs (pull-up, active-low wiring) and the
    /// display outputs.
    pub fn init(&mut self) {
        for (button, _) in &self.buttons {
            self.io.configure(button.pin(), Direction::Input, Pull::Up);
        }
        self.display.init(&mut self.io);
    }

    /// Runs one cooperative cycle.
    ///
    /// Button edges are collected and applied before the time-tick check,
    /// so a press and a one-second boundary landing in the same cycle
    /// always apply the press's transition first. The cycle ends by
    /// rendering one display digit and sleeping the multiplex slice.
    pub fn step(&mut self) {
        let mut events: Vec<ButtonEvent, 4> = Vec::new();
        for (button, event) in &mut self.buttons {
            if button.poll(&self.io, self.clock) {
                // Capacity equals the button count; push cannot fail.
                let _ = events.push(*event);
            }
        }

        let now_ms = self.clock.now_ms();
        for event in events {
            self.timer.handle_event(event, now_ms);
        }
        self.timer.tick(self.clock.now_ms());

        let frame = DisplayFrame::mm_ss(self.timer.remaining_seconds());
        self.display.render_next(&mut self.io, &frame);

        self.clock.sleep_us(MULTIPLEX_SLICE_US);
    }

    /// Runs the loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// The countdown state machine, for inspection.
    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    /// The display multiplexer, for inspection.
    pub fn display(&self) -> &DisplayMultiplexer {
        &self.display
    }

    /// The I/O implementation, for inspection.
    pub fn io(&self) -> &Io {
        &self.io
    }
}
