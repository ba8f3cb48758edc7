//! Polling scheduler with automatic rescheduling
//!
//! Drives the fetch -> dispatch -> reschedule cycle. At most one fetch is in
//! flight at a time, and the next cycle is armed only once the current
//! outcome is known.

use crate::client::CommandClient;
use crate::command::handlers::DeviceControl;
use crate::command::CommandDispatcher;
use crate::config::AgentConfig;
use crate::poll::recovery::RecoveryController;
use crate::poll::state::{PollEvent, PollState};
use crate::status::StatusSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Handle to a running poll loop
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Wait for the poll loop task to finish
    pub async fn join(&mut self) -> Result<(), tokio::task::JoinError> {
        (&mut self.task).await
    }
}

/// Owns the poll lifecycle and spawns the loop that drives it
///
/// A scheduler polls from `start()` until `stop()`; once stopped it never
/// polls again. Replacing a stopped scheduler means building a fresh one.
pub struct PollScheduler {
    device_id: String,
    poll_interval: Duration,
    client: Arc<dyn CommandClient>,
    dispatcher: Arc<CommandDispatcher>,
    recovery: Arc<RecoveryController>,
    state: Arc<Mutex<PollState>>,
    stop_tx: watch::Sender<bool>,
}

impl PollScheduler {
    /// Create a scheduler wired to the given client, controls and status sink
    pub fn new(
        config: &AgentConfig,
        client: Arc<dyn CommandClient>,
        controls: Arc<dyn DeviceControl>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        let dispatcher = Arc::new(CommandDispatcher::new(
            config.device_id.clone(),
            client.clone(),
            controls,
            status.clone(),
        ));
        let recovery = Arc::new(RecoveryController::new(config, client.clone(), status));
        let (stop_tx, _) = watch::channel(false);

        Self {
            device_id: config.device_id.clone(),
            poll_interval: config.poll_interval,
            client,
            dispatcher,
            recovery,
            state: Arc::new(Mutex::new(PollState::new())),
            stop_tx,
        }
    }

    /// Start polling; the first cycle fires immediately
    ///
    /// Returns `None` when the scheduler is already running or was stopped.
    pub async fn start(&self) -> Option<PollHandle> {
        self.state.lock().await.apply(PollEvent::Start)?;

        info!("Starting poll scheduler for device {}", self.device_id);

        let stop_rx = self.stop_tx.subscribe();
        let task = tokio::spawn(poll_loop(
            self.device_id.clone(),
            self.poll_interval,
            self.client.clone(),
            self.dispatcher.clone(),
            self.recovery.clone(),
            self.state.clone(),
            stop_rx,
        ));

        Some(PollHandle { task })
    }

    /// Stop polling
    ///
    /// Cancels any armed cycle. A fetch already on the wire is left to
    /// finish; its result is discarded.
    pub async fn stop(&self) {
        self.state.lock().await.apply(PollEvent::Stop);
        let _ = self.stop_tx.send(true);
        info!("Poll scheduler stopped");
    }

    /// Copy of the current polling state
    pub async fn snapshot(&self) -> PollState {
        *self.state.lock().await
    }

    /// Whether the scheduler is actively polling
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.is_running()
    }
}

/// Main poll loop: wait out the armed delay, fetch, dispatch, re-arm
async fn poll_loop(
    device_id: String,
    poll_interval: Duration,
    client: Arc<dyn CommandClient>,
    dispatcher: Arc<CommandDispatcher>,
    recovery: Arc<RecoveryController>,
    state: Arc<Mutex<PollState>>,
    mut stop_rx: watch::Receiver<bool>,
) {
    // First cycle runs with no delay
    let mut delay = Duration::ZERO;

    loop {
        if !delay.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = stop_rx.changed() => {
                    if changed.is_err() {
                        // Scheduler dropped without stop(); no one can reach
                        // this loop anymore
                        break;
                    }
                }
            }
        }

        // Arm the fetch, unless a stop landed while we waited
        if state.lock().await.apply(PollEvent::FetchStarted).is_none() {
            break;
        }

        debug!("Checking for commands");
        let outcome = client.fetch_commands(&device_id).await;

        // A stop that landed while the fetch was on the wire discards the
        // result entirely: no dispatch, no acknowledgments, no state change
        let outcome = {
            let mut guard = state.lock().await;
            if guard.apply(PollEvent::FetchCompleted).is_none() {
                debug!("Discarding fetch result, scheduler stopped");
                break;
            }
            match outcome {
                Ok(batch) => Ok(batch),
                Err(e) => Err(recovery.record_failure(&mut guard, &e)),
            }
        };

        delay = match outcome {
            Ok(batch) => {
                if !batch.is_empty() {
                    dispatcher.dispatch_batch(&batch).await;
                }
                recovery.on_success(&mut *state.lock().await);
                poll_interval
            }
            Err(action) => recovery.execute(action).await,
        };
    }

    info!("Poll loop exited");
}
