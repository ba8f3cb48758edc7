//! Client trait abstraction so the engine runs against fakes in tests

use super::error::FetchError;
use crate::protocol::CommandBatch;
use async_trait::async_trait;

/// Performs the network round trips to the command server
#[async_trait]
pub trait CommandClient: Send + Sync {
    /// Fetch the pending command batch for a device
    async fn fetch_commands(&self, device_id: &str) -> Result<CommandBatch, FetchError>;

    /// Report a command as processed; best-effort, callers only log failures
    async fn acknowledge(&self, command_id: &str, device_id: &str) -> Result<(), FetchError>;

    /// Discard any accumulated transport state and start from a fresh client
    async fn rebuild_transport(&self);
}
