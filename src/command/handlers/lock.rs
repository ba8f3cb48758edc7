//! Device lock and unlock command handlers

use super::HandlerContext;
use crate::command::CommandResult;
use crate::protocol::Command;
use tracing::info;

/// Handle LOCK_DEVICE
pub async fn handle_lock_device(ctx: &HandlerContext, _command: &Command) -> CommandResult {
    info!("  [LOCK_DEVICE] Lock requested for {}", ctx.device_id);

    match ctx.controls.lock_device().await {
        Ok(()) => CommandResult::Completed {
            message: "Device locked".into(),
        },
        Err(e) => CommandResult::Failed {
            message: format!("Failed to lock device: {}", e),
        },
    }
}

/// Handle UNLOCK_DEVICE
pub async fn handle_unlock_device(ctx: &HandlerContext, _command: &Command) -> CommandResult {
    info!("  [UNLOCK_DEVICE] Unlock requested for {}", ctx.device_id);

    match ctx.controls.unlock_device().await {
        Ok(()) => CommandResult::Completed {
            message: "Device unlocked".into(),
        },
        Err(e) => CommandResult::Failed {
            message: format!("Failed to unlock device: {}", e),
        },
    }
}
