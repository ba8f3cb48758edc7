//! HTTP implementation of the command client

use super::error::FetchError;
use super::traits::CommandClient;
use crate::config::AgentConfig;
use crate::protocol::{Acknowledgment, CommandBatch};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Command client over HTTP
///
/// Holds the connection pool behind a lock so recovery can replace it
/// wholesale, discarding any corrupted connection state.
pub struct HttpCommandClient {
    base_url: String,
    user_agent: String,
    request_timeout: Duration,
    connect_timeout: Duration,
    http: RwLock<reqwest::Client>,
}

/// Build a transport with the agent's identity and timeouts
fn build_transport(
    user_agent: &str,
    request_timeout: Duration,
    connect_timeout: Duration,
) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .build()
}

impl HttpCommandClient {
    /// Create a client from the agent configuration
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let transport = build_transport(
            &config.user_agent,
            config.request_timeout,
            config.connect_timeout,
        )?;

        Ok(Self {
            base_url: config.server_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            request_timeout: config.request_timeout,
            connect_timeout: config.connect_timeout,
            http: RwLock::new(transport),
        })
    }

    fn commands_url(&self, device_id: &str) -> String {
        format!("{}/check-commands/{}", self.base_url, device_id)
    }

    fn acknowledge_url(&self) -> String {
        format!("{}/acknowledge-command", self.base_url)
    }

    /// Snapshot the current transport without holding the lock across I/O
    async fn transport(&self) -> reqwest::Client {
        self.http.read().await.clone()
    }
}

#[async_trait]
impl CommandClient for HttpCommandClient {
    async fn fetch_commands(&self, device_id: &str) -> Result<CommandBatch, FetchError> {
        let url = self.commands_url(device_id);
        debug!("Checking for pending commands at {}", url);

        let response = self
            .transport()
            .await
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(FetchError::Server(status));
        }
        if status.is_client_error() {
            return Err(FetchError::Client(status));
        }
        if !status.is_success() {
            // Redirect leftovers and other oddities count as server trouble
            return Err(FetchError::Server(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(CommandBatch::decode(&body)?)
    }

    async fn acknowledge(&self, command_id: &str, device_id: &str) -> Result<(), FetchError> {
        let ack = Acknowledgment::processed(command_id, device_id);

        let response = self
            .transport()
            .await
            .post(self.acknowledge_url())
            .json(&ack)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        // Any response counts as delivered; the server decides what to keep
        let status = response.status();
        if status.is_success() {
            debug!("Command {} acknowledged", command_id);
        } else {
            debug!(
                "Acknowledgment for command {} answered with HTTP {}",
                command_id, status
            );
        }
        Ok(())
    }

    async fn rebuild_transport(&self) {
        match build_transport(&self.user_agent, self.request_timeout, self.connect_timeout) {
            Ok(fresh) => {
                *self.http.write().await = fresh;
                info!("HTTP transport rebuilt");
            }
            Err(e) => {
                error!("Failed to rebuild HTTP transport, keeping the old one: {}", e);
            }
        }
    }
}
