use cortex_m::peripheral::SYST;
use rtt_target::rprintln;
use stm32f0xx_hal::{pac, prelude::*};

use countdown_timer::{BoardPins, Pin as PinId};
use stm32f0_demo::board_io::BoardIo;

// Logical pin map: port 0 = GPIOA, port 1 = GPIOB, port 2 = GPIOC.

/// Segment lines a through g plus the decimal point, on PA0..PA7.
const SEGMENT_PINS: [PinId; 8] = [
    PinId::new(0, 0),
    PinId::new(0, 1),
    PinId::new(0, 2),
    PinId::new(0, 3),
    PinId::new(0, 4),
    PinId::new(0, 5),
    PinId::new(0, 6),
    PinId::new(0, 7),
];

/// Digit enables, leftmost first, on PB0..PB3.
const DIGIT_PINS: [PinId; 4] = [
    PinId::new(1, 0),
    PinId::new(1, 1),
    PinId::new(1, 2),
    PinId::new(1, 3),
];

/// Panel buttons on PC4..PC7 (pull-up, switch to ground).
const BTN_SELECT: PinId = PinId::new(2, 4);
const BTN_INCREMENT: PinId = PinId::new(2, 5);
const BTN_START: PinId = PinId::new(2, 6);
const BTN_RESET: PinId = PinId::new(2, 7);

/// Container for all initialized hardware
pub struct HardwareContext {
    pub io: BoardIo,
    pub pins: BoardPins,
    pub syst: SYST,
    pub sysclk_hz: u32,
}

/// Initialize clocks and GPIO.
///
/// SysTick is programmed separately once the clock configuration has been
/// validated; see `systick::configure`.
pub fn init_hardware() -> HardwareContext {
    let mut dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    let mut rcc = dp.RCC.configure().freeze(&mut dp.FLASH);
    let sysclk_hz = rcc.clocks.sysclk().0;
    rprintln!("System clock: {} Hz", sysclk_hz);

    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpiob = dp.GPIOB.split(&mut rcc);
    let gpioc = dp.GPIOC.split(&mut rcc);

    let outputs = cortex_m::interrupt::free(|cs| {
        [
            (SEGMENT_PINS[0], gpioa.pa0.into_push_pull_output(cs).downgrade()),
            (SEGMENT_PINS[1], gpioa.pa1.into_push_pull_output(cs).downgrade()),
            (SEGMENT_PINS[2], gpioa.pa2.into_push_pull_output(cs).downgrade()),
            (SEGMENT_PINS[3], gpioa.pa3.into_push_pull_output(cs).downgrade()),
            (SEGMENT_PINS[4], gpioa.pa4.into_push_pull_output(cs).downgrade()),
            (SEGMENT_PINS[5], gpioa.pa5.into_push_pull_output(cs).downgrade()),
            (SEGMENT_PINS[6], gpioa.pa6.into_push_pull_output(cs).downgrade()),
            (SEGMENT_PINS[7], gpioa.pa7.into_push_pull_output(cs).downgrade()),
            (DIGIT_PINS[0], gpiob.pb0.into_push_pull_output(cs).downgrade()),
            (DIGIT_PINS[1], gpiob.pb1.into_push_pull_output(cs).downgrade()),
            (DIGIT_PINS[2], gpiob.pb2.into_push_pull_output(cs).downgrade()),
            (DIGIT_PINS[3], gpiob.pb3.into_push_pull_output(cs).downgrade()),
        ]
    });

    let inputs = cortex_m::interrupt::free(|cs| {
        [
            (BTN_SELECT, gpioc.pc4.into_pull_up_input(cs).downgrade()),
            (BTN_INCREMENT, gpioc.pc5.into_pull_up_input(cs).downgrade()),
            (BTN_START, gpioc.pc6.into_pull_up_input(cs).downgrade()),
            (BTN_RESET, gpioc.pc7.into_pull_up_input(cs).downgrade()),
        ]
    });

    rprintln!("GPIO configured: 12 display lines, 4 buttons");

    HardwareContext {
        io: BoardIo::new(outputs, inputs),
        pins: BoardPins {
            select_button: BTN_SELECT,
            increment_button: BTN_INCREMENT,
            start_pause_button: BTN_START,
            reset_button: BTN_RESET,
            segment_pins: SEGMENT_PINS,
            digit_pins: DIGIT_PINS,
        },
        syst: cp.SYST,
        sysclk_hz,
    }
}
