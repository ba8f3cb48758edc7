//! Command server client
//!
//! This module handles:
//! - Fetching the pending command batch for the device
//! - Acknowledging each processed command
//! - Classifying failures for the recovery controller
//! - Rebuilding the transport wholesale during recovery

mod error;
mod http;
mod traits;

pub use error::FetchError;
pub use http::HttpCommandClient;
pub use traits::CommandClient;
