use crate::countdown::RemainingDuration;

// Everything the live view reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Countdown recomputed (every second)
    Tick(RemainingDuration),

    // Ctrl+C or kill signal
    Shutdown,
}
