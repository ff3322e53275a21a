//! Shared test infrastructure for countdown-timer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use countdown_timer::{Clock, DigitalIo, Direction, Level, Pin, Pull};
use heapless::index_map::FnvIndexMap;
use heapless::{Deque, Vec};

// ============================================================================
// Test Clock
// ============================================================================

/// Clock with controllable simulated time.
///
/// Sleeps advance simulated time instantly instead of spinning, so tests
/// that drive the main loop (and its debounce and multiplex delays) run in
/// no real time. Internally microseconds are tracked in u64 for test
/// bookkeeping; the `Clock` readings truncate to u32 and therefore wrap
/// exactly like the real counters.
pub struct TestClock {
    now_us: Cell<u64>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now_us: Cell::new(0),
        }
    }

    /// Starts the clock at an arbitrary millisecond reading, e.g. just
    /// below the u32 boundary for wraparound scenarios.
    pub fn at_ms(start_ms: u32) -> Self {
        let clock = Self::new();
        clock.now_us.set(u64::from(start_ms) * 1_000);
        clock
    }

    pub fn advance_ms(&self, ms: u32) {
        self.advance_us(u64::from(ms) * 1_000);
    }

    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> u32 {
        (self.now_us.get() / 1_000) as u32
    }

    fn now_us(&self) -> u32 {
        self.now_us.get() as u32
    }

    fn sleep_ms(&self, ms: u32) {
        self.advance_ms(ms);
    }

    fn sleep_us(&self, us: u32) {
        self.advance_us(u64::from(us));
    }
}

// ============================================================================
// Mock I/O
// ============================================================================

/// One recorded `write` call.
pub type WriteRecord = (Pin, Level);

/// Mock pin hardware with scripted input levels and a write log.
///
/// Reads return, in order of preference: the next queued level for the pin,
/// the pin's current level, or `High` (the idle state of a pulled-up
/// active-low line). Writes update the pin's current level and append to
/// the log; drain the log with [`take_writes`](Self::take_writes) between
/// the phases a test wants to inspect.
pub struct MockIo {
    levels: RefCell<FnvIndexMap<Pin, Level, 32>>,
    queued: RefCell<FnvIndexMap<Pin, Deque<Level, 16>, 8>>,
    writes: RefCell<Vec<WriteRecord, 512>>,
    configured: RefCell<Vec<(Pin, Direction, Pull), 32>>,
}

impl MockIo {
    pub fn new() -> Self {
        Self {
            levels: RefCell::new(FnvIndexMap::new()),
            queued: RefCell::new(FnvIndexMap::new()),
            writes: RefCell::new(Vec::new()),
            configured: RefCell::new(Vec::new()),
        }
    }

    /// Sets the level every subsequent read of `pin` observes.
    pub fn set_level(&self, pin: Pin, level: Level) {
        let _ = self.levels.borrow_mut().insert(pin, level);
    }

    /// Queues levels consumed one per read before falling back to the
    /// pin's current level.
    pub fn queue_levels(&self, pin: Pin, levels: &[Level]) {
        let mut queued = self.queued.borrow_mut();
        if !queued.contains_key(&pin) {
            let _ = queued.insert(pin, Deque::new());
        }
        let queue = queued.get_mut(&pin).unwrap();
        for level in levels {
            queue.push_back(*level).expect("level queue full");
        }
    }

    /// Current driven/scripted level of a pin.
    pub fn level(&self, pin: Pin) -> Level {
        self.levels.borrow().get(&pin).copied().unwrap_or(Level::High)
    }

    /// Drains and returns the write log.
    pub fn take_writes(&self) -> std::vec::Vec<WriteRecord> {
        let mut writes = self.writes.borrow_mut();
        let drained = writes.iter().copied().collect();
        writes.clear();
        drained
    }

    /// Configuration calls seen so far.
    pub fn configured(&self) -> std::vec::Vec<(Pin, Direction, Pull)> {
        self.configured.borrow().iter().copied().collect()
    }
}

impl DigitalIo for MockIo {
    fn configure(&mut self, pin: Pin, direction: Direction, pull: Pull) {
        let _ = self.configured.borrow_mut().push((pin, direction, pull));
    }

    fn write(&mut self, pin: Pin, level: Level) {
        let _ = self.levels.borrow_mut().insert(pin, level);
        let _ = self.writes.borrow_mut().push((pin, level));
    }

    fn read(&self, pin: Pin) -> Level {
        let queued_level = self
            .queued
            .borrow_mut()
            .get_mut(&pin)
            .and_then(|queue| queue.pop_front());
        if let Some(level) = queued_level {
            let _ = self.levels.borrow_mut().insert(pin, level);
            return level;
        }
        self.level(pin)
    }

    fn toggle(&mut self, pin: Pin) {
        let flipped = match self.level(pin) {
            Level::Low => Level::High,
            Level::High => Level::Low,
        };
        self.write(pin, flipped);
    }
}

// ============================================================================
// Board layout used across the integration tests
// ============================================================================

pub const BTN_SELECT: Pin = Pin::new(1, 20);
pub const BTN_INCREMENT: Pin = Pin::new(1, 21);
pub const BTN_START: Pin = Pin::new(1, 22);
pub const BTN_RESET: Pin = Pin::new(1, 23);

pub const SEGMENT_PINS: [Pin; 8] = [
    Pin::new(0, 0),
    Pin::new(0, 1),
    Pin::new(0, 2),
    Pin::new(0, 3),
    Pin::new(0, 4),
    Pin::new(0, 5),
    Pin::new(0, 6),
    Pin::new(0, 7),
];

pub const DIGIT_PINS: [Pin; 4] = [
    Pin::new(2, 0),
    Pin::new(2, 1),
    Pin::new(2, 2),
    Pin::new(2, 3),
];

pub fn board_pins() -> countdown_timer::BoardPins {
    countdown_timer::BoardPins {
        select_button: BTN_SELECT,
        increment_button: BTN_INCREMENT,
        start_pause_button: BTN_START,
        reset_button: BTN_RESET,
        segment_pins: SEGMENT_PINS,
        digit_pins: DIGIT_PINS,
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Levels written to `pin`, in order, within a write log.
pub fn writes_to(log: &[WriteRecord], pin: Pin) -> std::vec::Vec<Level> {
    log.iter()
        .filter(|(p, _)| *p == pin)
        .map(|(_, level)| *level)
        .collect()
}

/// Digit positions whose enable line is asserted right now.
pub fn asserted_digits(io: &MockIo) -> std::vec::Vec<usize> {
    DIGIT_PINS
        .iter()
        .enumerate()
        .filter(|(_, pin)| io.level(**pin).is_high())
        .map(|(index, _)| index)
        .collect()
}
