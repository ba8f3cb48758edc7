//! Command dispatcher - decodes, routes, and acknowledges incoming commands

use super::handlers::{self, DeviceControl, HandlerContext};
use crate::client::CommandClient;
use crate::protocol::{CommandBatch, CommandType};
use crate::status::StatusSink;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of a single handler invocation
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Handler ran and the effect took hold
    Completed { message: String },
    /// Handler reported an error; contained to this one command
    Failed { message: String },
}

/// Totals for one dispatched batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub executed: usize,
    pub failed: usize,
    pub unknown: usize,
    pub acknowledged: usize,
}

/// Routes each command in a batch to its handler and acknowledges it
///
/// Batch processing never aborts early: an unknown type or a failing handler
/// affects only its own command, and every seen command gets exactly one
/// acknowledgment attempt regardless of handler outcome.
pub struct CommandDispatcher {
    device_id: String,
    client: Arc<dyn CommandClient>,
    controls: Arc<dyn DeviceControl>,
    status: Arc<dyn StatusSink>,
}

impl CommandDispatcher {
    /// Create a new command dispatcher
    pub fn new(
        device_id: String,
        client: Arc<dyn CommandClient>,
        controls: Arc<dyn DeviceControl>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            device_id,
            client,
            controls,
            status,
        }
    }

    /// Process every command in the batch, in order
    pub async fn dispatch_batch(&self, batch: &CommandBatch) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        info!("Received {} commands from server", batch.len());

        for command in &batch.commands {
            info!("Processing command: id={} type={}", command.id, command.kind);

            let ctx = HandlerContext {
                device_id: self.device_id.clone(),
                command_id: command.id.clone(),
                controls: self.controls.clone(),
            };

            let result = match command.command_type() {
                CommandType::EnableLocation => {
                    Some(handlers::handle_enable_location(&ctx, command).await)
                }
                CommandType::RequestLocation => {
                    Some(handlers::handle_request_location(&ctx, command).await)
                }
                CommandType::LockDevice => {
                    Some(handlers::handle_lock_device(&ctx, command).await)
                }
                CommandType::UnlockDevice => {
                    Some(handlers::handle_unlock_device(&ctx, command).await)
                }
                CommandType::Unknown => {
                    warn!("Unknown command type: {}", command.kind);
                    None
                }
            };

            match result {
                Some(CommandResult::Completed { message }) => {
                    info!("  Command completed: {}", message);
                    self.status.update(&message);
                    summary.executed += 1;
                }
                Some(CommandResult::Failed { message }) => {
                    error!("  Command failed: {}", message);
                    summary.failed += 1;
                }
                None => {
                    summary.unknown += 1;
                }
            }

            // Seen is seen: the server hears back even for unknown types and
            // failed handlers, so delivery stays at-least-once
            match self.client.acknowledge(&command.id, &self.device_id).await {
                Ok(()) => summary.acknowledged += 1,
                Err(e) => warn!("Failed to acknowledge command {}: {}", command.id, e),
            }
        }

        summary
    }
}
