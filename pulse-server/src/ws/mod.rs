//! WebSocket handling for the echo endpoint

pub mod connection;
pub mod protocol;

pub use connection::{SESSION_COOKIE, ws_handler};
pub use protocol::{EchoBody, EchoMessage, EchoMessageType};
