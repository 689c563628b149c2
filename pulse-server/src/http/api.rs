//! REST API handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Number of known sessions
    pub total_sessions: usize,
    /// Number of sessions inside the online window
    pub online_sessions: usize,
}

/// Health check endpoint
///
/// Returns server status, version, uptime, and session counts. Counts fall
/// back to zero if the registry is already shut down.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let total_sessions = state.registry.count_total().await.unwrap_or_default();
    let online_sessions = state.registry.count_online().await.unwrap_or_default();

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        total_sessions,
        online_sessions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_session_counts() {
        let state = Arc::new(AppState::new());
        state.registry.create("1.1.1.1:1").await.unwrap();
        state.registry.create("2.2.2.2:2").await.unwrap();

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.total_sessions, 2);
        assert!(body.online_sessions <= body.total_sessions);
    }
}
