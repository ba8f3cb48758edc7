//! Failure classification for server round trips

use reqwest::StatusCode;
use thiserror::Error;

/// Ways a fetch round trip can go wrong
///
/// Every variant feeds the recovery controller's consecutive-failure counter;
/// none of them is fatal to the engine.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure: no connection, timeout, interrupted body read
    #[error("network error: {0}")]
    Network(String),

    /// The server answered in the 5xx class
    #[error("server error: HTTP {0}")]
    Server(StatusCode),

    /// The server answered in the 4xx class; device-not-registered lands here
    /// and is tolerated
    #[error("client error: HTTP {0}")]
    Client(StatusCode),

    /// The response body was not decodable
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}
