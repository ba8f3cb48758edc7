//! Self-healing command polling engine for remotely managed devices.
//!
//! A device running this engine periodically asks its server for pending
//! commands, executes each one, and acknowledges it, surviving network and
//! server failures indefinitely by backing off and, past a failure
//! threshold, rebuilding its transport from scratch.
//!
//! Provides:
//! - HTTP command client with failure classification
//! - Command dispatch with per-command failure containment
//! - Linear capped backoff and threshold-triggered recovery
//! - A polling scheduler with a strict single-in-flight lifecycle
//! - A supervisor that replaces schedulers that die unexpectedly

pub mod backoff;
pub mod client;
pub mod command;
pub mod config;
pub mod poll;
pub mod protocol;
pub mod status;
pub mod supervisor;

// Re-exports
pub use backoff::BackoffPolicy;
pub use client::{CommandClient, FetchError, HttpCommandClient};
pub use command::{CommandDispatcher, CommandResult, DispatchSummary};
pub use config::AgentConfig;
pub use poll::{PollHandle, PollPhase, PollScheduler, PollState, RecoveryAction};
pub use protocol::{Acknowledgment, Command, CommandBatch, CommandType};
pub use status::{LogStatusSink, NullStatusSink, StatusSink};
pub use supervisor::{SchedulerFactory, Supervisor};
