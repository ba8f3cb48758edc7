//! Poll lifecycle state machine
//!
//! Defines the scheduler phases and which transitions between them are valid.

use tokio::time::Instant;

/// Phases of the polling scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Created but not started
    Idle,
    /// Next cycle armed, waiting out the delay
    Scheduled,
    /// A fetch is on the wire
    InFlight,
    /// Terminal; a stopped scheduler never polls again
    Stopped,
}

/// Events that drive the poll lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent {
    /// `start()` was called
    Start,
    /// The armed delay elapsed and a fetch began
    FetchStarted,
    /// The fetch returned, success or failure
    FetchCompleted,
    /// `stop()` was called
    Stop,
}

/// The next phase for an event, if the transition is valid
pub fn transition(phase: PollPhase, event: PollEvent) -> Option<PollPhase> {
    use PollEvent::*;
    use PollPhase::*;

    match (phase, event) {
        (Idle, Start) => Some(Scheduled),
        (Scheduled, FetchStarted) => Some(InFlight),
        (InFlight, FetchCompleted) => Some(Scheduled),

        // Stop wins from anywhere, including Stopped itself
        (_, Stop) => Some(Stopped),

        // Everything else (double start, late completions, ...) is a no-op
        _ => None,
    }
}

/// Mutable polling state owned by the scheduler
///
/// Mutated only while holding the scheduler's lock; never shared across an
/// await point.
#[derive(Debug, Clone, Copy)]
pub struct PollState {
    phase: PollPhase,
    /// Fetch failures since the last success or recovery
    pub consecutive_failures: u32,
    /// When the last successful fetch completed
    pub last_success: Option<Instant>,
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}

impl PollState {
    /// Create state in the Idle phase with no recorded history
    pub fn new() -> Self {
        Self {
            phase: PollPhase::Idle,
            consecutive_failures: 0,
            last_success: None,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    /// Whether the scheduler is actively polling (armed or in flight)
    pub fn is_running(&self) -> bool {
        matches!(self.phase, PollPhase::Scheduled | PollPhase::InFlight)
    }

    /// Apply an event, updating the phase if the transition is valid
    pub fn apply(&mut self, event: PollEvent) -> Option<PollPhase> {
        let next = transition(self.phase, event)?;
        self.phase = next;
        Some(next)
    }
}
