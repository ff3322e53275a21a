//! `DigitalIo` implementation over type-erased stm32f0xx-hal pins.

use countdown_timer::{DigitalIo, Direction, Level, Pin as PinId, Pull};
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin};
use stm32f0xx_hal::gpio::{Input, Output, Pin, PullUp, PushPull};

/// Number of driven lines: 8 segment lines plus 4 digit enables.
pub const OUTPUT_COUNT: usize = 12;

/// Number of sampled lines: the 4 panel buttons.
pub const INPUT_COUNT: usize = 4;

/// Pin hardware for the countdown board.
///
/// Each hardware pin is paired with the logical [`PinId`] the control core
/// addresses it by. Pins are moved in already configured in their final
/// modes, so `configure` has nothing left to do at runtime.
pub struct BoardIo {
    outputs: [(PinId, Pin<Output<PushPull>>); OUTPUT_COUNT],
    inputs: [(PinId, Pin<Input<PullUp>>); INPUT_COUNT],
}

impl BoardIo {
    pub fn new(
        outputs: [(PinId, Pin<Output<PushPull>>); OUTPUT_COUNT],
        inputs: [(PinId, Pin<Input<PullUp>>); INPUT_COUNT],
    ) -> Self {
        Self { outputs, inputs }
    }
}

impl DigitalIo for BoardIo {
    fn configure(&mut self, _pin: PinId, _direction: Direction, _pull: Pull) {
        // The typed HAL fixes each pin's mode during hardware init; runtime
        // reconfiguration is not supported on this board.
    }

    fn write(&mut self, pin: PinId, level: Level) {
        if let Some((_, output)) = self.outputs.iter_mut().find(|(id, _)| *id == pin) {
            match level {
                Level::High => output.set_high().unwrap(),
                Level::Low => output.set_low().unwrap(),
            }
        }
    }

    fn read(&self, pin: PinId) -> Level {
        match self.inputs.iter().find(|(id, _)| *id == pin) {
            // Idle level of a pulled-up line is high.
            None => Level::High,
            Some((_, input)) => {
                if input.is_low().unwrap() {
                    Level::Low
                } else {
                    Level::High
                }
            }
        }
    }

    fn toggle(&mut self, pin: PinId) {
        if let Some((_, output)) = self.outputs.iter_mut().find(|(id, _)| *id == pin) {
            if output.is_set_high().unwrap() {
                output.set_low().unwrap();
            } else {
                output.set_high().unwrap();
            }
        }
    }
}
