//! Time abstraction for platform-agnostic timing.

/// Wraparound-safe elapsed milliseconds between two counter readings.
///
/// Subtraction is performed in u32 modular space, so the result stays correct
/// when the counter wraps past `u32::MAX` (roughly every 49.7 days at 1 kHz).
#[inline]
pub fn elapsed_ms(now_ms: u32, start_ms: u32) -> u32 {
    now_ms.wrapping_sub(start_ms)
}

/// Wraparound-safe elapsed microseconds between two counter readings.
#[inline]
pub fn elapsed_us(now_us: u32, start_us: u32) -> u32 {
    now_us.wrapping_sub(start_us)
}

/// Trait for abstracting the system clock.
///
/// `now_ms` and `now_us` are free-running counters that wrap at 2^32; compare
/// readings with [`elapsed_ms`]/[`elapsed_us`] rather than `-` or `<`.
///
/// The sleep methods have default busy-wait implementations that poll the
/// counters until the deadline passes. Hardware clocks can override them with
/// something more precise; test clocks override them to advance simulated
/// time instead of spinning.
pub trait Clock {
    /// Milliseconds since the clock started.
    fn now_ms(&self) -> u32;

    /// Microseconds since the clock started, with sub-millisecond resolution.
    fn now_us(&self) -> u32;

    /// Blocks until at least `ms` milliseconds have elapsed.
    fn sleep_ms(&self, ms: u32) {
        let start = self.now_ms();
        while elapsed_ms(self.now_ms(), start) < ms {}
    }

    /// Blocks until at least `us` microseconds have elapsed.
    fn sleep_us(&self, us: u32) {
        let start = self.now_us();
        while elapsed_us(self.now_us(), start) < us {}
    }
}
