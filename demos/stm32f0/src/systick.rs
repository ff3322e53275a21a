//! SysTick wiring for the 1 ms tick.

use cortex_m::peripheral::SYST;
use cortex_m::peripheral::syst::SystClkSource;
use countdown_timer::{ClockConfig, DownCounter, TickCounter};

/// Global millisecond counter incremented by the SysTick interrupt.
///
/// Wraps after ~49.7 days of continuous operation; all library arithmetic
/// on it is wraparound-safe.
pub static TICKS: TickCounter = TickCounter::new();

/// Increments the global counter.
///
/// Call this from the SysTick interrupt handler every 1 ms. It's `pub` so
/// the handler in the binary crate can reach it.
pub fn tick() {
    TICKS.increment();
}

/// Programs SysTick to reload every millisecond off the core clock.
pub fn configure(syst: &mut SYST, config: &ClockConfig) {
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(config.reload());
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();
}

/// Live SysTick `VAL` register access for the clock's paired reads.
pub struct SystickCounter;

impl DownCounter for SystickCounter {
    fn current(&self) -> u32 {
        SYST::get_current()
    }
}
