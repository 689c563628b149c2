//! Server error types

use thiserror::Error;

/// Errors that can occur in the pulse server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Registry error bubbled up from a session operation
    #[error("registry error: {0}")]
    Registry(#[from] pulse_core::RegistryError),

    /// Session known to the connection but missing from the registry
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Invalid message format
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}
