//! Location command handlers

use super::HandlerContext;
use crate::command::CommandResult;
use crate::protocol::Command;
use tracing::info;

/// Handle ENABLE_LOCATION
pub async fn handle_enable_location(ctx: &HandlerContext, _command: &Command) -> CommandResult {
    info!("  [ENABLE_LOCATION] Enabling location collection");

    match ctx.controls.enable_location().await {
        Ok(()) => CommandResult::Completed {
            message: "Location services enabled".into(),
        },
        Err(e) => CommandResult::Failed {
            message: format!("Failed to enable location services: {}", e),
        },
    }
}

/// Handle REQUEST_LOCATION
///
/// Triggers a one-shot location fix; the resulting position is reported
/// out of band by the location collaborator, not through this engine.
pub async fn handle_request_location(ctx: &HandlerContext, _command: &Command) -> CommandResult {
    info!("  [REQUEST_LOCATION] Location update requested");

    match ctx.controls.request_location().await {
        Ok(()) => CommandResult::Completed {
            message: "Location tracking active".into(),
        },
        Err(e) => CommandResult::Failed {
            message: format!("Failed to request location: {}", e),
        },
    }
}
