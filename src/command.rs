//! Button events driving the countdown state machine.

/// A debounced press edge from one of the four panel buttons.
///
/// Events carry no payload; which transition (if any) they cause depends on
/// the state machine's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Copy the configured target into the displayed remaining time.
    Select,
    /// Add one step to the target time, wrapping past the maximum.
    Increment,
    /// Start, pause, resume, or acknowledge completion.
    StartPause,
    /// Return to Set mode with the remaining time re-armed.
    Reset,
}
