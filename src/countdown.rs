//! Countdown state machine.
//!
//! [`CountdownTimer`] owns the remaining-time value shown on the display.
//! Debounced button events move it between states; the per-second decrement
//! runs off elapsed milliseconds supplied by the caller, never off wall
//! clock reads of its own.

use crate::command::ButtonEvent;
use crate::time::elapsed_ms;

/// Target time armed at power-up.
pub const DEFAULT_TARGET_SECONDS: u16 = 60;

/// Smallest configurable target; the increment wraps back here.
pub const MIN_TARGET_SECONDS: u16 = 10;

/// Largest configurable target (99:59 on a four-digit display).
pub const MAX_TARGET_SECONDS: u16 = 5_999;

/// Seconds added per increment press.
pub const TARGET_STEP_SECONDS: u16 = 10;

const SECOND_MS: u32 = 1_000;

/// The current state of the countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Idle; the target time is editable.
    Set,
    /// Counting down.
    Running,
    /// Held; remaining time frozen.
    Paused,
    /// Reached zero; terminal until acknowledged.
    Done,
}

/// Four-state countdown controller.
///
/// The timer is the sole authority on the displayed value: the display layer
/// reads [`remaining_seconds`](Self::remaining_seconds) and never mutates it.
/// Events whose precondition state does not match the current state are
/// ignored rather than rejected.
pub struct CountdownTimer {
    state: TimerState,
    set_seconds: u16,
    remaining_seconds: u16,
    last_tick_ms: u32,
}

impl CountdownTimer {
    /// Creates a timer in `Set` state with the default target.
    pub fn new() -> Self {
        Self::with_target(DEFAULT_TARGET_SECONDS)
    }

    /// Creates a timer with a specific target, clamped to
    /// `[MIN_TARGET_SECONDS, MAX_TARGET_SECONDS]`.
    pub fn with_target(target_seconds: u16) -> Self {
        let set_seconds = target_seconds.clamp(MIN_TARGET_SECONDS, MAX_TARGET_SECONDS);
        Self {
            state: TimerState::Set,
            set_seconds,
            remaining_seconds: set_seconds,
            last_tick_ms: 0,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Seconds left on the countdown; this is the displayed value.
    pub fn remaining_seconds(&self) -> u16 {
        self.remaining_seconds
    }

    /// The configured target time.
    pub fn set_seconds(&self) -> u16 {
        self.set_seconds
    }

    /// Applies a debounced button event.
    ///
    /// `now_ms` is the current clock reading, used to arm the one-second
    /// reference tick when the countdown starts or resumes.
    pub fn handle_event(&mut self, event: ButtonEvent, now_ms: u32) {
        match event {
            ButtonEvent::Select => self.select(),
            ButtonEvent::Increment => self.increment(),
            ButtonEvent::StartPause => self.start_pause(now_ms),
            ButtonEvent::Reset => self.reset(),
        }
    }

    /// Copies the target into the remaining time. `Set` state only.
    pub fn select(&mut self) {
        if self.state == TimerState::Set {
            self.remaining_seconds = self.set_seconds;
        }
    }

    /// Adds [`TARGET_STEP_SECONDS`] to the target, wrapping past
    /// [`MAX_TARGET_SECONDS`] back to [`MIN_TARGET_SECONDS`], and refreshes
    /// the remaining time to match. `Set` state only.
    pub fn increment(&mut self) {
        if self.state != TimerState::Set {
            return;
        }

        self.set_seconds += TARGET_STEP_SECONDS;
        if self.set_seconds > MAX_TARGET_SECONDS {
            self.set_seconds = MIN_TARGET_SECONDS;
        }
        self.remaining_seconds = self.set_seconds;
    }

    /// Start/pause toggle.
    ///
    /// * `Set` - arms the countdown from the target and starts it
    /// * `Running` - pauses, freezing the remaining time
    /// * `Paused` - resumes; the reference tick is re-armed so the next
    ///   decrement comes a full second after resuming, but the remaining
    ///   time is kept
    /// * `Done` - acknowledges completion and returns to `Set`
    pub fn start_pause(&mut self, now_ms: u32) {
        match self.state {
            TimerState::Set => {
                self.state = TimerState::Running;
                self.remaining_seconds = self.set_seconds;
                self.last_tick_ms = now_ms;
            }
            TimerState::Running => {
                self.state = TimerState::Paused;
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_tick_ms = now_ms;
            }
            TimerState::Done => {
                self.state = TimerState::Set;
                self.remaining_seconds = self.set_seconds;
            }
        }
    }

    /// Unconditionally returns to `Set` with the remaining time re-armed.
    pub fn reset(&mut self) {
        self.state = TimerState::Set;
        self.remaining_seconds = self.set_seconds;
    }

    /// Advances the one-second countdown.
    ///
    /// While `Running`, every full 1000 ms window since the reference tick
    /// decrements the remaining time by one; reaching zero transitions to
    /// `Done`. The reference tick moves forward by whole windows rather than
    /// resetting to `now_ms`, so a poll arriving late does not accumulate
    /// drift. Several windows elapsed in one call are all consumed.
    pub fn tick(&mut self, now_ms: u32) {
        while self.state == TimerState::Running
            && elapsed_ms(now_ms, self.last_tick_ms) >= SECOND_MS
        {
            self.last_tick_ms = self.last_tick_ms.wrapping_add(SECOND_MS);

            if self.remaining_seconds > 0 {
                self.remaining_seconds -= 1;
                if self.remaining_seconds == 0 {
                    self.state = TimerState::Done;
                }
            } else {
                self.state = TimerState::Done;
            }
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
