//! Status sink abstraction for user-visible connection state

use tracing::info;

/// Receives human-readable status updates from the engine
///
/// Implementations must not block: the engine calls this from the polling
/// path and expects it to return immediately. Status text never feeds back
/// into control flow.
pub trait StatusSink: Send + Sync {
    /// Display the latest status line
    fn update(&self, status: &str);
}

/// Sink that forwards status lines to the log
pub struct LogStatusSink;

impl StatusSink for LogStatusSink {
    fn update(&self, status: &str) {
        info!("[STATUS] {}", status);
    }
}

/// Sink that discards everything, for embedders without a display
pub struct NullStatusSink;

impl StatusSink for NullStatusSink {
    fn update(&self, _status: &str) {}
}
