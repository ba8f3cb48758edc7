//! Wire types for the command server's JSON protocol
//!
//! A fetch response carries `{ "commands": [ { "id", "type", ... }, ... ] }`.
//! Decoding is tolerant: an absent or non-array `commands` key is an empty
//! batch, and a malformed element is skipped without aborting the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Command types the agent knows how to execute
///
/// The wire carries free-form strings; anything unrecognized maps to
/// `Unknown` and is tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    EnableLocation,
    RequestLocation,
    LockDevice,
    UnlockDevice,
    Unknown,
}

impl CommandType {
    /// Parse a wire-format type string
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "ENABLE_LOCATION" => CommandType::EnableLocation,
            "REQUEST_LOCATION" => CommandType::RequestLocation,
            "LOCK_DEVICE" => CommandType::LockDevice,
            "UNLOCK_DEVICE" => CommandType::UnlockDevice,
            _ => CommandType::Unknown,
        }
    }
}

/// A single command received from the server
///
/// Immutable once decoded. Fields beyond `id` and `type` are opaque to the
/// engine and kept for the handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    /// Server-assigned opaque identifier
    pub id: String,
    /// Wire-format type string (kept raw so unknown values can be logged)
    #[serde(rename = "type")]
    pub kind: String,
    /// Any additional fields the server attached
    #[serde(flatten)]
    pub payload: serde_json::Map<String, Value>,
}

impl Command {
    /// The parsed command type
    pub fn command_type(&self) -> CommandType {
        CommandType::from_wire(&self.kind)
    }
}

/// Ordered sequence of commands from one fetch response
#[derive(Debug, Clone, Default)]
pub struct CommandBatch {
    pub commands: Vec<Command>,
}

impl CommandBatch {
    /// Decode a fetch response body into a batch
    ///
    /// Returns an error only when the body is non-empty and not valid JSON.
    /// A missing or non-array `commands` key yields an empty batch; elements
    /// that fail to decode are skipped with a warning.
    pub fn decode(body: &str) -> Result<Self, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_str(body)?;

        let Some(items) = value.get("commands").and_then(Value::as_array) else {
            return Ok(Self::default());
        };

        let mut commands = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<Command>(item.clone()) {
                Ok(command) => commands.push(command),
                Err(e) => warn!("Skipping malformed command in batch: {}", e),
            }
        }

        Ok(Self { commands })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Completion report sent back for every seen command
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub command_id: String,
    pub device_id: String,
    pub status: String,
}

impl Acknowledgment {
    /// Create a "processed" acknowledgment for a command
    pub fn processed(command_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
            device_id: device_id.into(),
            status: "processed".into(),
        }
    }
}
