#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use countdown_timer::{ClockConfig, CountdownApp, SysTickClock};
use stm32f0_demo::systick::{self, SystickCounter};

mod hardware_setup;

/// SysTick interrupt handler - called every 1ms
#[cortex_m_rt::exception]
fn SysTick() {
    systick::tick();
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== Countdown Timer ===");

    let mut hw = hardware_setup::init_hardware();

    let config = match ClockConfig::new(hw.sysclk_hz) {
        Ok(config) => config,
        Err(e) => {
            rprintln!("Clock configuration rejected: {}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };
    systick::configure(&mut hw.syst, &config);

    let clock = SysTickClock::new(&systick::TICKS, SystickCounter, config);

    let mut app = CountdownApp::new(hw.io, &clock, hw.pins);
    app.init();

    rprintln!("=== System Ready ===");
    rprintln!("Buttons: select / +10s / start-pause / reset");

    app.run()
}
