//! Error types for pulse-core

use thiserror::Error;

/// Errors surfaced by the session registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Registry is shut down")]
    Closed,
}
