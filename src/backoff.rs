//! Backoff policy for failed poll cycles
//!
//! Delay grows linearly with the consecutive-failure count and is capped,
//! so a long outage settles at a steady retry cadence instead of growing
//! without bound.

use std::time::Duration;

/// Computes the retry delay for a given consecutive-failure count
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Delay applied after the first failure; each further failure adds one more
    base: Duration,
    /// Ceiling for the computed delay
    cap: Duration,
}

impl BackoffPolicy {
    /// Create a policy with the given base interval and cap
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self { base, cap }
    }

    /// Delay before the next cycle after `failures` consecutive failures
    ///
    /// `delay(n) = min(base * n, cap)`. Saturates at the cap for any count
    /// large enough to overflow the multiplication.
    pub fn delay(&self, failures: u32) -> Duration {
        self.base
            .checked_mul(failures)
            .map_or(self.cap, |d| d.min(self.cap))
    }
}
