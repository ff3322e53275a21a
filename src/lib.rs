#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Clock`**: Trait to implement for your timing system; sleeps default
//!   to wraparound-safe busy-waits on the counters
//! - **`TickCounter`**: Millisecond counter owned by the tick interrupt
//!   handler
//! - **`SysTickClock`**: `Clock` built on the tick counter plus the live
//!   hardware down-counter, with atomically paired reads for microsecond
//!   resolution
//! - **`Pin` / `DigitalIo`**: Port/offset pin identifiers and the trait to
//!   implement for your GPIO hardware
//! - **`DebouncedButton`**: Active-low press edge detector with a blocking
//!   settle window
//! - **`ButtonEvent`**: The four debounced panel events
//! - **`CountdownTimer` / `TimerState`**: Set/Running/Paused/Done state
//!   machine owning the remaining time
//! - **`DisplayFrame` / `DisplayMultiplexer`**: MM:SS digit formatting and
//!   one-digit-per-call time multiplexing
//! - **`CountdownApp` / `BoardPins`**: The cooperative main loop over all of
//!   the above
//!
//! Compile-time tunables live next to their subsystems: the debounce window
//! in [`button`], the target-time bounds in [`countdown`], the multiplex
//! slice in [`app`].

pub mod app;
pub mod button;
pub mod clock;
pub mod command;
pub mod countdown;
pub mod display;
pub mod gpio;
pub mod time;

pub use app::{BoardPins, CountdownApp, MULTIPLEX_SLICE_US};
pub use button::{DEBOUNCE_WINDOW_MS, DebouncedButton};
pub use clock::{ClockConfig, ClockConfigError, DownCounter, SysTickClock, TickCounter};
pub use command::ButtonEvent;
pub use countdown::{
    CountdownTimer, DEFAULT_TARGET_SECONDS, MAX_TARGET_SECONDS, MIN_TARGET_SECONDS,
    TARGET_STEP_SECONDS, TimerState,
};
pub use display::{DisplayFrame, DisplayMultiplexer, SEGMENT_PATTERNS, segment_pattern};
pub use gpio::{DigitalIo, Direction, Level, Pin, Pull};
pub use time::{Clock, elapsed_ms, elapsed_us};
