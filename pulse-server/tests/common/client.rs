//! WebSocket test client for the echo endpoint
//!
//! Connects with or without a session cookie and exchanges echo JSON.

use std::net::SocketAddr;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A connected echo client and the session id handed out on connect
pub struct EchoClient {
    stream: WsStream,
    /// Session id from the Set-Cookie header, if the server issued one
    pub assigned_session_id: Option<String>,
}

impl EchoClient {
    /// Connect to the echo endpoint, optionally presenting a session cookie
    pub async fn connect(addr: SocketAddr, session_cookie: Option<&str>) -> Self {
        let url = format!("ws://{addr}/ws");
        let mut request = url.into_client_request().expect("valid request");
        if let Some(id) = session_cookie {
            request.headers_mut().insert(
                "Cookie",
                format!("sessionId={id}").parse().expect("valid header"),
            );
        }

        let (stream, response) = tokio_tungstenite::connect_async(request)
            .await
            .expect("Failed to connect");

        let assigned_session_id = response
            .headers()
            .get("set-cookie")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("sessionId="))
            .map(|value| value.to_string());

        Self {
            stream,
            assigned_session_id,
        }
    }

    /// Send an echo ping with the given seq and sendAt, return the parsed reply
    pub async fn echo(&mut self, seq: i32, send_at: i64) -> serde_json::Value {
        let ping = serde_json::json!({
            "type": 0,
            "data": { "sendAt": send_at, "seq": seq },
        });
        self.stream
            .send(Message::Text(ping.to_string().into()))
            .await
            .unwrap();

        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str()).expect("valid echo JSON");
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => panic!("WebSocket error: {e}"),
                None => panic!("WebSocket closed"),
            }
        }
    }
}
