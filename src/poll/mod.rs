//! Poll cycle orchestration
//!
//! This module handles:
//! - The scheduler lifecycle state machine
//! - Failure accounting, backoff and transport recovery
//! - The loop driving fetch -> dispatch -> reschedule

mod recovery;
mod scheduler;
mod state;

pub use recovery::{RecoveryAction, RecoveryController};
pub use scheduler::{PollHandle, PollScheduler};
pub use state::{transition, PollEvent, PollPhase, PollState};
