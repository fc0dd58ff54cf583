//! Error types for zone handling and host integration.

use thiserror::Error;

/// Errors raised by a host while subscribing to a signal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host does not publish the requested path.
    #[error("Unknown path: {0}")]
    UnknownPath(String),

    /// The host needs a tokio runtime to deliver values and none is running.
    #[error("No async runtime available to deliver values")]
    NoRuntime,
}

/// Errors that prevent a single path from being watched.
///
/// These are reported per path; they never stop other paths from starting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZonesError {
    /// An active path was configured without any zones.
    #[error("Path {key} has no zones configured")]
    EmptyZones { key: String },

    /// The host refused the value subscription.
    #[error("Failed to subscribe to {key}: {source}")]
    Subscribe {
        key: String,
        #[source]
        source: HostError,
    },
}

impl ZonesError {
    /// The path key this error belongs to.
    pub fn key(&self) -> &str {
        match self {
            ZonesError::EmptyZones { key } => key,
            ZonesError::Subscribe { key, .. } => key,
        }
    }
}
