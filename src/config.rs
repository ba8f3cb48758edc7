//! Agent configuration

use std::time::Duration;

/// Configuration for the polling agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Opaque identifier this device registered with the server
    pub device_id: String,
    /// Base URL of the command server, e.g. "http://127.0.0.1:8080"
    pub server_url: String,
    /// Delay between poll cycles when the last fetch succeeded
    pub poll_interval: Duration,
    /// Upper bound on the backoff delay between failed cycles
    pub max_backoff: Duration,
    /// Consecutive failures that trigger a full transport recovery
    pub failure_threshold: u32,
    /// Delay before the next poll after a transport recovery
    pub recovery_delay: Duration,
    /// Delay before the supervisor replaces a dead scheduler
    pub restart_delay: Duration,
    /// Whole-request timeout for a single HTTP call
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            device_id: "device-001".into(),
            server_url: "http://127.0.0.1:8080".into(),
            poll_interval: Duration::from_secs(30),
            max_backoff: Duration::from_secs(300),
            failure_threshold: 10,
            recovery_delay: Duration::from_secs(60),
            restart_delay: Duration::from_secs(15),
            request_timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(20),
            user_agent: concat!("tether/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}
