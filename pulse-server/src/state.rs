//! Shared application state for the pulse server

use chrono::{DateTime, Utc};
use pulse_core::SessionRegistry;

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Handle to the session registry actor
    pub registry: SessionRegistry,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState with a freshly started registry.
    ///
    /// Spawns the registry actor, so this must run inside a tokio runtime.
    pub fn new() -> Self {
        Self {
            registry: SessionRegistry::start(),
            started_at: Utc::now(),
        }
    }

    /// Create AppState around an existing registry handle (for testing)
    pub fn with_registry(registry: SessionRegistry) -> Self {
        Self {
            registry,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
