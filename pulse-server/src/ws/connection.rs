//! WebSocket connection handling
//!
//! Each connection is bound to one session. A returning client presents a
//! `sessionId` cookie and is logged back in; a new client gets a freshly
//! created session and a Set-Cookie on the upgrade response. Registry
//! failures terminate the affected connection only, never the process.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info, warn};

use crate::{AppState, ServerError};

use super::protocol::EchoMessage;

/// Name of the cookie carrying the session identifier
pub const SESSION_COOKIE: &str = "sessionId";

/// WebSocket upgrade handler for the echo endpoint
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    let remote_addr = remote.to_string();

    let (session_id, is_new) = match cookie_value(&headers, SESSION_COOKIE) {
        Some(id) => {
            if let Err(e) = state.registry.log_in(&id, remote_addr.as_str()).await {
                error!("Failed to log session in: {}", e);
                return StatusCode::SERVICE_UNAVAILABLE.into_response();
            }
            info!(session_id = %id, remote_addr = %remote_addr, "Logged in session");
            (id, false)
        }
        None => match state.registry.create(remote_addr.clone()).await {
            Ok(id) => {
                info!(session_id = %id, remote_addr = %remote_addr, "Created session");
                (id, true)
            }
            Err(e) => {
                error!("Failed to create session: {}", e);
                return StatusCode::SERVICE_UNAVAILABLE.into_response();
            }
        },
    };

    let mut response = ws.on_upgrade({
        let session_id = session_id.clone();
        move |socket| handle_socket(socket, state, session_id)
    });

    if is_new {
        if let Ok(value) = format!("{SESSION_COOKIE}={session_id}").parse() {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }

    response
}

/// Per-connection echo loop
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, session_id: String) {
    let (mut sender, mut receiver) = socket.split();

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match handle_echo(&text, &state, &session_id).await {
                Ok(reply) => {
                    if sender.send(Message::Text(reply.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(session_id = %session_id, "Closing connection: {}", e);
                    break;
                }
            },
            Ok(Message::Close(_)) => {
                debug!(session_id = %session_id, "Client sent close frame");
                break;
            }
            Ok(Message::Ping(data)) => {
                if sender.send(Message::Pong(data)).await.is_err() {
                    break;
                }
            }
            Ok(_) => {
                // Ignore binary and pong frames
            }
            Err(e) => {
                error!(session_id = %session_id, "WebSocket error: {}", e);
                break;
            }
        }
    }

    debug!(session_id = %session_id, "Connection closed");
}

/// Process one inbound echo message: mark the session alive, then build the
/// pong carrying the current online count and the session's display number.
async fn handle_echo(
    text: &str,
    state: &Arc<AppState>,
    session_id: &str,
) -> Result<String, ServerError> {
    let ping: EchoMessage =
        serde_json::from_str(text).map_err(|e| ServerError::InvalidMessage(e.to_string()))?;

    state.registry.ping(session_id).await?;
    let online_count = state.registry.count_online().await?;
    let record = state
        .registry
        .query(session_id)
        .await?
        .ok_or_else(|| ServerError::SessionNotFound(session_id.to_string()))?;

    let pong = EchoMessage::pong_for(
        &ping,
        Utc::now().timestamp_millis(),
        online_count,
        record.session_number,
    );
    serde_json::to_string(&pong).map_err(|e| ServerError::Internal(e.to_string()))
}

/// Pull a cookie value out of the request headers
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get_all(COOKIE).iter().find_map(|header| {
        let raw = header.to_str().ok()?;
        raw.split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    })
}
