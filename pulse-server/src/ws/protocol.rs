//! Echo protocol message types
//!
//! Messages are JSON objects with a numeric `type` tag: 0 for client pings,
//! 1 for server pongs. Replies echo the client's seq and sendAt, stamp
//! receivedAt, and attach the online count and session number as extension
//! values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Direction tag for echo messages. Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EchoMessageType {
    /// Client-to-server ping
    Ping = 0,
    /// Server-to-client pong
    Pong = 1,
}

impl From<EchoMessageType> for u8 {
    fn from(kind: EchoMessageType) -> u8 {
        kind as u8
    }
}

impl TryFrom<u8> for EchoMessageType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Ping),
            1 => Ok(Self::Pong),
            other => Err(format!("unknown echo message type: {other}")),
        }
    }
}

/// Payload of an echo message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoBody {
    /// Client send timestamp, millis since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_at: Option<i64>,

    /// Server receive timestamp, set on replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<i64>,

    /// Client sequence number, echoed back unchanged
    pub seq: i32,

    /// String key/value extras; replies carry `onlineCount` and `sessionNumber`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<HashMap<String, String>>,
}

/// One echo message as exchanged over the WebSocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoMessage {
    #[serde(rename = "type")]
    pub kind: EchoMessageType,
    pub data: EchoBody,
}

impl EchoMessage {
    /// Build the pong reply for a received ping
    pub fn pong_for(
        ping: &EchoMessage,
        received_at_ms: i64,
        online_count: usize,
        session_number: usize,
    ) -> Self {
        let mut extension = HashMap::new();
        extension.insert("onlineCount".to_string(), online_count.to_string());
        extension.insert("sessionNumber".to_string(), session_number.to_string());

        Self {
            kind: EchoMessageType::Pong,
            data: EchoBody {
                send_at: ping.data.send_at,
                received_at: Some(received_at_ms),
                seq: ping.data.seq,
                extension: Some(extension),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_deserializes_with_only_required_fields() {
        let msg: EchoMessage = serde_json::from_str(r#"{"type":0,"data":{"seq":3}}"#).unwrap();
        assert_eq!(msg.kind, EchoMessageType::Ping);
        assert_eq!(msg.data.seq, 3);
        assert_eq!(msg.data.send_at, None);
        assert_eq!(msg.data.extension, None);
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let result = serde_json::from_str::<EchoMessage>(r#"{"type":2,"data":{"seq":0}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn pong_serializes_with_camel_case_fields_and_numeric_tag() {
        let ping = EchoMessage {
            kind: EchoMessageType::Ping,
            data: EchoBody {
                send_at: Some(1_700_000_000_000),
                received_at: None,
                seq: 7,
                extension: None,
            },
        };

        let pong = EchoMessage::pong_for(&ping, 1_700_000_000_123, 4, 2);
        let value: serde_json::Value = serde_json::to_value(&pong).unwrap();

        assert_eq!(value["type"], 1);
        assert_eq!(value["data"]["sendAt"], 1_700_000_000_000_i64);
        assert_eq!(value["data"]["receivedAt"], 1_700_000_000_123_i64);
        assert_eq!(value["data"]["seq"], 7);
        assert_eq!(value["data"]["extension"]["onlineCount"], "4");
        assert_eq!(value["data"]["extension"]["sessionNumber"], "2");
    }

    #[test]
    fn absent_optionals_are_omitted_from_json() {
        let msg = EchoMessage {
            kind: EchoMessageType::Ping,
            data: EchoBody {
                seq: 1,
                ..EchoBody::default()
            },
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":0,"data":{"seq":1}}"#);
    }

    #[test]
    fn round_trip_preserves_message() {
        let ping = EchoMessage {
            kind: EchoMessageType::Ping,
            data: EchoBody {
                send_at: Some(42),
                received_at: None,
                seq: 9,
                extension: Some(HashMap::from([("k".to_string(), "v".to_string())])),
            },
        };
        let json = serde_json::to_string(&ping).unwrap();
        let back: EchoMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ping);
    }
}
