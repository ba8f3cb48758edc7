//! Command execution infrastructure for the polling agent
//!
//! This module handles:
//! - Routing decoded commands to their handlers
//! - Containing per-command handler failures
//! - Acknowledging every seen command back to the server

mod dispatcher;
pub mod handlers;

pub use dispatcher::{CommandDispatcher, CommandResult, DispatchSummary};
