//! Command handlers for the supported command types

mod location;
mod lock;

pub use location::{handle_enable_location, handle_request_location};
pub use lock::{handle_lock_device, handle_unlock_device};

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Device-side effects the handlers can trigger
///
/// The actual work (starting location services, locking the screen) belongs
/// to the host platform; the engine only invokes it and observes success or
/// failure.
#[async_trait]
pub trait DeviceControl: Send + Sync {
    /// Turn on background location collection
    async fn enable_location(&self) -> Result<()>;

    /// Trigger a one-shot location fix
    async fn request_location(&self) -> Result<()>;

    /// Lock the device
    async fn lock_device(&self) -> Result<()>;

    /// Unlock the device
    async fn unlock_device(&self) -> Result<()>;
}

/// Context passed to command handlers
#[derive(Clone)]
pub struct HandlerContext {
    pub device_id: String,
    pub command_id: String,
    pub controls: Arc<dyn DeviceControl>,
}

/// Control surface that only logs the requested action
///
/// Stands in until a platform integration is wired up.
pub struct NoopControl;

#[async_trait]
impl DeviceControl for NoopControl {
    async fn enable_location(&self) -> Result<()> {
        info!("[CONTROL] enable_location (no platform integration)");
        Ok(())
    }

    async fn request_location(&self) -> Result<()> {
        info!("[CONTROL] request_location (no platform integration)");
        Ok(())
    }

    async fn lock_device(&self) -> Result<()> {
        info!("[CONTROL] lock_device (no platform integration)");
        Ok(())
    }

    async fn unlock_device(&self) -> Result<()> {
        info!("[CONTROL] unlock_device (no platform integration)");
        Ok(())
    }
}
