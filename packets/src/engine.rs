//! Engine.IO v4 transport packets.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::{Deserialize, Serialize};

use crate::CodecError;

/// Parameters the server announces in its open packet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    /// Engine.IO session id.
    pub sid: String,
    /// Transports the session may upgrade to; unused over WebSocket.
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Milliseconds between server pings.
    pub ping_interval: u64,
    /// Milliseconds the server waits for a pong.
    pub ping_timeout: u64,
    /// Largest payload the server accepts, in bytes.
    #[serde(default)]
    pub max_payload: Option<u64>,
}

/// A single Engine.IO packet as sent in one WebSocket text frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnginePacket {
    /// `0{...}`: session opened.
    Open(Handshake),
    /// `1`: transport closing.
    Close,
    /// `2`: heartbeat from the server, with optional probe data.
    Ping(String),
    /// `3`: heartbeat reply.
    Pong(String),
    /// `4...`: a Socket.IO packet.
    Message(String),
    /// `5`: transport upgrade.
    Upgrade,
    /// `6`: no-op.
    Noop,
}

/// Decode one Engine.IO text packet.
///
/// # Errors
///
/// Returns [`CodecError::Empty`] for empty input,
/// [`CodecError::UnknownEngineType`] for an unknown type character, and
/// [`CodecError::Handshake`] when an open packet carries invalid JSON.
pub fn decode_engine(text: &str) -> Result<EnginePacket, CodecError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(CodecError::Empty)?;
    let body = chars.as_str();

    match kind {
        '0' => serde_json::from_str(body)
            .map(EnginePacket::Open)
            .map_err(CodecError::Handshake),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping(body.to_owned())),
        '3' => Ok(EnginePacket::Pong(body.to_owned())),
        '4' => Ok(EnginePacket::Message(body.to_owned())),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(CodecError::UnknownEngineType(other)),
    }
}

/// Encode one Engine.IO packet as text.
#[must_use]
pub fn encode_engine(packet: &EnginePacket) -> String {
    match packet {
        EnginePacket::Open(handshake) => {
            // Serializing a struct of strings and integers cannot fail.
            let json = serde_json::to_string(handshake).unwrap_or_default();
            format!("0{json}")
        }
        EnginePacket::Close => "1".to_owned(),
        EnginePacket::Ping(data) => format!("2{data}"),
        EnginePacket::Pong(data) => format!("3{data}"),
        EnginePacket::Message(data) => format!("4{data}"),
        EnginePacket::Upgrade => "5".to_owned(),
        EnginePacket::Noop => "6".to_owned(),
    }
}
