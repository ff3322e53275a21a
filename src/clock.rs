//! SysTick-style monotonic clock.
//!
//! Wraps a hardware down-counter and its reload-triggered interrupt into the
//! [`Clock`] interface: the interrupt handler increments a [`TickCounter`]
//! once per millisecond, and [`SysTickClock`] combines that count with the
//! live counter register for microsecond resolution.

use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};

use crate::time::Clock;

/// Millisecond tick counter shared with the tick interrupt handler.
///
/// The interrupt handler is the sole writer; everything else only reads.
/// Construction is `const`, so the counter can live in a `static` reachable
/// from the handler:
///
/// ```rust,ignore
/// static TICKS: TickCounter = TickCounter::new();
///
/// #[exception]
/// fn SysTick() {
///     TICKS.increment();
/// }
/// ```
pub struct TickCounter(Mutex<Cell<u32>>);

impl TickCounter {
    /// Creates a counter starting at zero.
    pub const fn new() -> Self {
        Self(Mutex::new(Cell::new(0)))
    }

    /// Advances the counter by one millisecond.
    ///
    /// Call exactly once per tick interrupt. Wraps at 2^32.
    pub fn increment(&self) {
        critical_section::with(|cs| {
            let ticks = self.0.borrow(cs);
            ticks.set(ticks.get().wrapping_add(1));
        });
    }

    /// Current tick count in milliseconds.
    pub fn millis(&self) -> u32 {
        critical_section::with(|cs| self.read(cs))
    }

    fn read(&self, cs: CriticalSection) -> u32 {
        self.0.borrow(cs).get()
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Live access to the hardware down-counter driving the tick interrupt.
///
/// The counter counts down from the configured reload value to zero; the
/// reload event raises the tick interrupt. Readings must stay within
/// `[0, reload]`. On Cortex-M this is the SysTick `VAL` register.
pub trait DownCounter {
    /// Current counter value.
    fn current(&self) -> u32;
}

/// Errors rejected when deriving tick timing from a clock frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockConfigError {
    /// The configured frequency is zero.
    ZeroFrequency,

    /// The configured frequency is below 1 kHz, so no whole number of
    /// counter ticks fits in a 1 ms period.
    FrequencyTooLow {
        /// The rejected frequency.
        frequency_hz: u32,
    },
}

impl core::fmt::Display for ClockConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockConfigError::ZeroFrequency => {
                write!(f, "clock frequency must be non-zero")
            }
            ClockConfigError::FrequencyTooLow { frequency_hz } => {
                write!(
                    f,
                    "clock frequency {} Hz is too low for a 1 ms tick (minimum 1000 Hz)",
                    frequency_hz
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockConfigError {}

/// Validated 1 ms tick timing derived from the core clock frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    frequency_hz: u32,
    ticks_per_ms: u32,
}

impl ClockConfig {
    /// Derives tick timing from the core clock frequency.
    ///
    /// # Returns
    /// * `Err(ClockConfigError::ZeroFrequency)` - frequency is zero
    /// * `Err(ClockConfigError::FrequencyTooLow)` - frequency below 1 kHz
    pub fn new(frequency_hz: u32) -> Result<Self, ClockConfigError> {
        if frequency_hz == 0 {
            return Err(ClockConfigError::ZeroFrequency);
        }
        if frequency_hz < 1_000 {
            return Err(ClockConfigError::FrequencyTooLow { frequency_hz });
        }

        Ok(Self {
            frequency_hz,
            ticks_per_ms: frequency_hz / 1_000,
        })
    }

    /// The core clock frequency this configuration was derived from.
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Counter ticks per millisecond.
    pub fn ticks_per_ms(&self) -> u32 {
        self.ticks_per_ms
    }

    /// Reload value for the hardware down-counter.
    ///
    /// The counter counts `reload..=0`, so one full period is
    /// `ticks_per_ms` ticks.
    pub fn reload(&self) -> u32 {
        self.ticks_per_ms - 1
    }
}

/// Tick count and counter register captured as one atomic snapshot.
#[derive(Debug, Clone, Copy)]
struct TickSnapshot {
    millis: u32,
    counter: u32,
}

/// Monotonic clock combining a [`TickCounter`] with the live down-counter.
///
/// Millisecond queries read the tick count alone. Microsecond queries pair
/// the tick count with the counter register; the two reads are taken inside
/// a single critical section because the tick interrupt can fire between
/// them, pairing a fresh count with a stale register value (or vice versa).
pub struct SysTickClock<'t, D: DownCounter> {
    ticks: &'t TickCounter,
    counter: D,
    config: ClockConfig,
}

impl<'t, D: DownCounter> SysTickClock<'t, D> {
    /// Creates a clock over an already-configured hardware counter.
    ///
    /// The hardware must be programmed with [`ClockConfig::reload`] and its
    /// interrupt must call [`TickCounter::increment`] once per reload.
    pub fn new(ticks: &'t TickCounter, counter: D, config: ClockConfig) -> Self {
        Self {
            ticks,
            counter,
            config,
        }
    }

    /// The configuration this clock was built with.
    pub fn config(&self) -> ClockConfig {
        self.config
    }

    fn snapshot(&self) -> TickSnapshot {
        critical_section::with(|cs| TickSnapshot {
            millis: self.ticks.read(cs),
            counter: self.counter.current(),
        })
    }

    /// Elapsed ticks within the current millisecond, given a pair of counter
    /// readings. The counter counts down; a reading above the start value
    /// means the counter reloaded in between.
    fn ticks_between(&self, start: u32, current: u32) -> u32 {
        if current <= start {
            start - current
        } else {
            start + (self.config.reload() - current)
        }
    }
}

impl<D: DownCounter> Clock for SysTickClock<'_, D> {
    fn now_ms(&self) -> u32 {
        self.ticks.millis()
    }

    fn now_us(&self) -> u32 {
        let snap = self.snapshot();
        let reload = self.config.reload();

        let ticks_elapsed = reload - snap.counter;
        let us_in_ms = (u64::from(ticks_elapsed) * 1_000 / u64::from(reload + 1)) as u32;

        snap.millis.wrapping_mul(1_000).wrapping_add(us_in_ms)
    }

    fn sleep_us(&self, us: u32) {
        let mut remaining = us;
        if remaining >= 1_000 {
            self.sleep_ms(remaining / 1_000);
            remaining %= 1_000;
        }
        if remaining == 0 {
            return;
        }

        // Round up, so a request below one tick still waits a full tick
        // rather than returning immediately.
        let ticks_needed =
            (u64::from(remaining) * u64::from(self.config.ticks_per_ms())).div_ceil(1_000) as u32;

        let start = self.counter.current();
        loop {
            let current = self.counter.current();
            if self.ticks_between(start, current) >= ticks_needed {
                break;
            }
        }
    }
}
