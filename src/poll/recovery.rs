//! Failure accounting and transport recovery policy
//!
//! Every fetch failure lands here. Below the threshold the response is a
//! capped linear backoff; at the threshold the transport is rebuilt from
//! scratch and polling resumes after an extended delay.

use crate::backoff::BackoffPolicy;
use crate::client::{CommandClient, FetchError};
use crate::config::AgentConfig;
use crate::poll::state::PollState;
use crate::status::StatusSink;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// What the scheduler should do after a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Wait out a backoff delay, keeping the current transport
    Backoff { delay: Duration },
    /// Rebuild the transport, then wait the extended recovery delay
    Recover { delay: Duration },
}

/// Decides between plain backoff and full transport recovery
pub struct RecoveryController {
    failure_threshold: u32,
    recovery_delay: Duration,
    backoff: BackoffPolicy,
    client: Arc<dyn CommandClient>,
    status: Arc<dyn StatusSink>,
}

impl RecoveryController {
    /// Create a controller using the configured thresholds and delays
    pub fn new(
        config: &AgentConfig,
        client: Arc<dyn CommandClient>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            failure_threshold: config.failure_threshold,
            recovery_delay: config.recovery_delay,
            backoff: BackoffPolicy::new(config.poll_interval, config.max_backoff),
            client,
            status,
        }
    }

    /// Record a successful fetch: clear the failure count and stamp the time
    pub fn on_success(&self, state: &mut PollState) {
        if state.consecutive_failures > 0 {
            info!(
                "Connection restored after {} consecutive failures",
                state.consecutive_failures
            );
        }
        state.consecutive_failures = 0;
        state.last_success = Some(Instant::now());
        self.status.update("Connected");
    }

    /// Record a failed fetch and decide the follow-up
    ///
    /// Does no I/O, so the caller can invoke it while holding the state
    /// lock; side effects run in [`execute`](Self::execute).
    pub fn record_failure(&self, state: &mut PollState, error: &FetchError) -> RecoveryAction {
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        let failures = state.consecutive_failures;

        // A 404 usually means the device is not registered server-side yet.
        // It still counts as a failure but keeps polling like any other.
        if matches!(error, FetchError::Client(StatusCode::NOT_FOUND)) {
            info!(
                "Device not registered on server yet ({} consecutive failures)",
                failures
            );
        } else {
            warn!("Fetch failed ({} consecutive): {}", failures, error);
        }

        if failures >= self.failure_threshold {
            state.consecutive_failures = 0;
            RecoveryAction::Recover {
                delay: self.recovery_delay,
            }
        } else {
            RecoveryAction::Backoff {
                delay: self.backoff.delay(failures),
            }
        }
    }

    /// Apply an action's side effects and return the delay to arm
    pub async fn execute(&self, action: RecoveryAction) -> Duration {
        match action {
            RecoveryAction::Backoff { delay } => {
                self.status.update("Retrying connection...");
                delay
            }
            RecoveryAction::Recover { delay } => {
                warn!("Failure threshold reached, rebuilding transport");
                self.status.update("Recovering connection...");
                self.client.rebuild_transport().await;
                delay
            }
        }
    }
}
