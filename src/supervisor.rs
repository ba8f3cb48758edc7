//! Supervisor that keeps a poll scheduler alive
//!
//! The engine never restarts itself. When the poll loop dies without a stop
//! request, the supervisor builds a fresh scheduler after a fixed delay, the
//! way a host service manager would resurrect a crashed worker.

use crate::poll::PollScheduler;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

/// Builds a fresh scheduler for each (re)start
pub type SchedulerFactory = Box<dyn Fn() -> Arc<PollScheduler> + Send + Sync>;

/// Owns scheduler instances and replaces ones that die unexpectedly
pub struct Supervisor {
    factory: SchedulerFactory,
    restart_delay: Duration,
}

impl Supervisor {
    /// Create a supervisor around a scheduler factory
    pub fn new(factory: SchedulerFactory, restart_delay: Duration) -> Self {
        Self {
            factory,
            restart_delay,
        }
    }

    /// Run schedulers until the shutdown signal flips to true
    ///
    /// On shutdown the current scheduler is stopped and its loop awaited, so
    /// an in-flight cycle gets to finish before this returns.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        loop {
            let scheduler = (self.factory)();
            let Some(mut handle) = scheduler.start().await else {
                warn!("Factory produced a scheduler that refused to start, supervisor exiting");
                break;
            };

            tokio::select! {
                result = handle.join() => {
                    match result {
                        Ok(()) => warn!("Poll loop exited without a stop request"),
                        Err(e) => warn!("Poll loop task died: {}", e),
                    }
                    info!("Replacing scheduler in {:?}", self.restart_delay);

                    tokio::select! {
                        _ = tokio::time::sleep(self.restart_delay) => {}
                        _ = shutdown.changed() => break,
                    }
                }
                _ = shutdown.changed() => {
                    info!("Shutdown requested, stopping scheduler");
                    scheduler.stop().await;
                    if let Err(e) = handle.join().await {
                        warn!("Poll loop did not exit cleanly: {}", e);
                    }
                    break;
                }
            }
        }

        info!("Supervisor exited");
    }
}
