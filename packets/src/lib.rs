//! Socket.IO text packet codec for the assistant chat transport.
//!
//! This crate owns the wire representation spoken between the chat widget and
//! its Socket.IO backend: Engine.IO v4 transport packets, the Socket.IO v5
//! packets carried inside them, and the derivation of the WebSocket URL from a
//! configured endpoint. It has no browser dependencies so the whole protocol
//! surface is testable natively.
//!
//! Only the text encoding is supported. Binary events and acks (packet kinds
//! `5` and `6`) are rejected with [`CodecError::BinaryUnsupported`].

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

mod engine;
mod socket;

pub use engine::{EnginePacket, Handshake, decode_engine, encode_engine};
pub use socket::{PacketKind, SocketPacket, decode_socket, encode_socket};

/// Path the Socket.IO server is mounted on.
pub const SOCKET_IO_PATH: &str = "/socket.io/";

/// Engine.IO protocol revision spoken by this codec.
pub const ENGINE_IO_VERSION: u8 = 4;

/// Namespace used when the endpoint URL carries no path.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Error returned by the decoders and by [`Endpoint::parse`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The packet text was empty.
    #[error("empty packet")]
    Empty,
    /// The leading Engine.IO type character is not a known packet type.
    #[error("unknown engine packet type: {0:?}")]
    UnknownEngineType(char),
    /// The leading Socket.IO type character is not a known packet kind.
    #[error("unknown socket packet kind: {0:?}")]
    UnknownPacketKind(char),
    /// Binary attachments are not supported by the text codec.
    #[error("binary packets are not supported")]
    BinaryUnsupported,
    /// The open packet handshake JSON could not be parsed.
    #[error("invalid handshake: {0}")]
    Handshake(#[source] serde_json::Error),
    /// The packet payload is not valid JSON.
    #[error("invalid packet payload: {0}")]
    Payload(#[source] serde_json::Error),
    /// An event packet whose payload is not `[name, ...args]`.
    #[error("event payload must be an array starting with the event name")]
    InvalidEvent,
    /// The ack id digits overflow `u64`.
    #[error("invalid ack id: {0}")]
    InvalidAckId(String),
    /// The configured endpoint is not an absolute http(s) or ws(s) URL.
    #[error("invalid endpoint {0:?}: {1}")]
    InvalidEndpoint(String, &'static str),
}

/// A parsed Socket.IO endpoint.
///
/// Mirrors how `socket.io-client` reads `io(url)`: the scheme and authority
/// select the server, and any path selects the namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// `ws` or `wss`.
    pub scheme: &'static str,
    /// Host plus optional port, e.g. `example.com:3000`.
    pub authority: String,
    /// Namespace to connect to, always starting with `/`.
    pub namespace: String,
}

impl Endpoint {
    /// Parse an absolute endpoint URL.
    ///
    /// `http`/`https` are mapped to `ws`/`wss`. Trailing slashes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidEndpoint`] for unsupported schemes, a
    /// missing host, or URLs carrying a query string or fragment.
    pub fn parse(raw: &str) -> Result<Self, CodecError> {
        let trimmed = raw.trim();
        let invalid = |reason| CodecError::InvalidEndpoint(trimmed.to_owned(), reason);

        let (scheme, rest) = if let Some(rest) = trimmed.strip_prefix("https://") {
            ("wss", rest)
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            ("ws", rest)
        } else if let Some(rest) = trimmed.strip_prefix("wss://") {
            ("wss", rest)
        } else if let Some(rest) = trimmed.strip_prefix("ws://") {
            ("ws", rest)
        } else {
            return Err(invalid("expected http, https, ws or wss scheme"));
        };

        if rest.contains(['?', '#']) {
            return Err(invalid("query strings and fragments are not supported"));
        }

        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        if authority.is_empty() {
            return Err(invalid("missing host"));
        }

        let path = path.trim_end_matches('/');
        let namespace = if path.is_empty() { DEFAULT_NAMESPACE.to_owned() } else { path.to_owned() };

        Ok(Self { scheme, authority: authority.to_owned(), namespace })
    }

    /// WebSocket transport URL for this endpoint.
    #[must_use]
    pub fn websocket_url(&self) -> String {
        format!(
            "{}://{}{SOCKET_IO_PATH}?EIO={ENGINE_IO_VERSION}&transport=websocket",
            self.scheme, self.authority
        )
    }
}

/// Wrap a Socket.IO packet into the Engine.IO message that carries it.
#[must_use]
pub fn encode_message(packet: &SocketPacket) -> String {
    encode_engine(&EnginePacket::Message(encode_socket(packet)))
}
