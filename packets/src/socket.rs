//! Socket.IO v5 packets carried inside Engine.IO messages.
//!
//! Text layout: `<kind>[<namespace>,][<ack id>][<json payload>]`, where the
//! namespace is omitted for `/`.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use serde_json::Value;

use crate::{CodecError, DEFAULT_NAMESPACE};

/// Socket.IO packet type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketKind {
    Connect,
    Disconnect,
    Event,
    Ack,
    ConnectError,
    BinaryEvent,
    BinaryAck,
}

impl PacketKind {
    /// Wire digit for this kind.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Connect => '0',
            Self::Disconnect => '1',
            Self::Event => '2',
            Self::Ack => '3',
            Self::ConnectError => '4',
            Self::BinaryEvent => '5',
            Self::BinaryAck => '6',
        }
    }

    fn from_char(c: char) -> Result<Self, CodecError> {
        match c {
            '0' => Ok(Self::Connect),
            '1' => Ok(Self::Disconnect),
            '2' => Ok(Self::Event),
            '3' => Ok(Self::Ack),
            '4' => Ok(Self::ConnectError),
            '5' => Ok(Self::BinaryEvent),
            '6' => Ok(Self::BinaryAck),
            other => Err(CodecError::UnknownPacketKind(other)),
        }
    }
}

/// A decoded Socket.IO packet.
#[derive(Clone, Debug, PartialEq)]
pub struct SocketPacket {
    pub kind: PacketKind,
    /// Namespace, always starting with `/`.
    pub namespace: String,
    /// Acknowledgement id requested by the sender, if any.
    pub ack_id: Option<u64>,
    /// JSON payload; `None` when the packet carries no body.
    pub data: Option<Value>,
}

impl SocketPacket {
    /// Namespace connect request with no auth payload.
    #[must_use]
    pub fn connect(namespace: &str) -> Self {
        Self { kind: PacketKind::Connect, namespace: namespace.to_owned(), ack_id: None, data: None }
    }

    /// Namespace disconnect.
    #[must_use]
    pub fn disconnect(namespace: &str) -> Self {
        Self { kind: PacketKind::Disconnect, namespace: namespace.to_owned(), ack_id: None, data: None }
    }

    /// Named event with positional arguments.
    #[must_use]
    pub fn event(namespace: &str, name: &str, args: Vec<Value>) -> Self {
        let mut payload = Vec::with_capacity(args.len() + 1);
        payload.push(Value::String(name.to_owned()));
        payload.extend(args);
        Self {
            kind: PacketKind::Event,
            namespace: namespace.to_owned(),
            ack_id: None,
            data: Some(Value::Array(payload)),
        }
    }

    /// Event name and arguments, when this is a well-formed event packet.
    #[must_use]
    pub fn event_parts(&self) -> Option<(&str, &[Value])> {
        if self.kind != PacketKind::Event {
            return None;
        }
        let items = self.data.as_ref()?.as_array()?;
        let (name, args) = items.split_first()?;
        Some((name.as_str()?, args))
    }

    /// Human-readable reason carried by a connect error packet.
    #[must_use]
    pub fn connect_error_message(&self) -> Option<&str> {
        if self.kind != PacketKind::ConnectError {
            return None;
        }
        match self.data.as_ref()? {
            Value::String(message) => Some(message.as_str()),
            other => other.get("message").and_then(Value::as_str),
        }
    }
}

/// Decode the Socket.IO packet carried in an Engine.IO message body.
///
/// # Errors
///
/// Fails on empty input, unknown kinds, binary packets, oversized ack ids,
/// invalid JSON, and event packets whose payload is not `[name, ...]`.
pub fn decode_socket(text: &str) -> Result<SocketPacket, CodecError> {
    let mut chars = text.chars();
    let kind = PacketKind::from_char(chars.next().ok_or(CodecError::Empty)?)?;
    if matches!(kind, PacketKind::BinaryEvent | PacketKind::BinaryAck) {
        return Err(CodecError::BinaryUnsupported);
    }
    let mut rest = chars.as_str();

    let namespace = if rest.starts_with('/') {
        let end = rest.find(',').unwrap_or(rest.len());
        let ns = &rest[..end];
        rest = rest.get(end + 1..).unwrap_or_default();
        ns.to_owned()
    } else {
        DEFAULT_NAMESPACE.to_owned()
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let ack_id = if digits > 0 {
        let raw = &rest[..digits];
        rest = &rest[digits..];
        Some(raw.parse::<u64>().map_err(|_| CodecError::InvalidAckId(raw.to_owned()))?)
    } else {
        None
    };

    let data = if rest.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<Value>(rest).map_err(CodecError::Payload)?)
    };

    let packet = SocketPacket { kind, namespace, ack_id, data };
    if packet.kind == PacketKind::Event && packet.event_parts().is_none() {
        return Err(CodecError::InvalidEvent);
    }
    Ok(packet)
}

/// Encode a Socket.IO packet as text (without the Engine.IO `4` prefix).
#[must_use]
pub fn encode_socket(packet: &SocketPacket) -> String {
    let mut out = String::new();
    out.push(packet.kind.as_char());
    if packet.namespace != DEFAULT_NAMESPACE {
        out.push_str(&packet.namespace);
        out.push(',');
    }
    if let Some(id) = packet.ack_id {
        out.push_str(&id.to_string());
    }
    if let Some(data) = &packet.data {
        out.push_str(&data.to_string());
    }
    out
}
