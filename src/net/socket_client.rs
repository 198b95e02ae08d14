//! WebSocket connection task for the socket channel.
//!
//! `open` derives the Socket.IO transport URL, spawns one connection task,
//! and returns the handle immediately; input is accepted before the
//! connection is up. There is no reconnect: when the task ends the handle
//! stays inert and later emits are dropped by the closed queue.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "csr")]` since it
//! requires a browser environment. Packet handling is plain code so it can
//! be exercised natively.
//!
//! ERROR HANDLING
//! ==============
//! Undecodable packets are logged and skipped. Transport failures and
//! connect errors end the task with a logged reason; nothing is surfaced to
//! the conversation.

#[cfg(test)]
#[path = "socket_client_test.rs"]
mod socket_client_test;

use packets::{CodecError, EnginePacket, PacketKind, decode_engine, decode_socket, encode_engine, encode_message};
use serde_json::Value;

use crate::net::socket::SocketHandle;

/// What the reader should do after one inbound text frame.
#[derive(Debug, PartialEq, Eq)]
pub enum Incoming {
    Continue,
    /// The session ended; the reason is for logs only.
    Closed(String),
}

/// Open the socket channel for `endpoint`.
///
/// Outside the browser no transport exists: the handle is returned detached
/// and every emit on it is dropped.
pub fn open(endpoint: &packets::Endpoint) -> SocketHandle {
    let (handle, rx) = SocketHandle::new(&endpoint.namespace);

    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(run(endpoint.websocket_url(), handle.clone(), rx));
    }
    #[cfg(not(feature = "csr"))]
    {
        drop(rx);
        leptos::logging::log!("socket channel for {} is detached outside the browser", endpoint.websocket_url());
    }

    handle
}

/// Apply one inbound Engine.IO text frame to the handle.
///
/// # Errors
///
/// Returns the codec error for frames that cannot be decoded; the caller
/// logs it and keeps reading.
pub fn handle_incoming(handle: &SocketHandle, text: &str) -> Result<Incoming, CodecError> {
    match decode_engine(text)? {
        EnginePacket::Open(handshake) => {
            leptos::logging::log!(
                "socket session {} opened (ping every {}ms)",
                handshake.sid,
                handshake.ping_interval
            );
            handle.send_control(encode_message(&packets::SocketPacket::connect(handle.namespace())));
            Ok(Incoming::Continue)
        }
        EnginePacket::Ping(data) => {
            handle.send_control(encode_engine(&EnginePacket::Pong(data)));
            Ok(Incoming::Continue)
        }
        EnginePacket::Close => Ok(Incoming::Closed("server closed the session".to_owned())),
        EnginePacket::Message(body) => handle_socket_packet(handle, &body),
        EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Ok(Incoming::Continue),
    }
}

fn handle_socket_packet(handle: &SocketHandle, body: &str) -> Result<Incoming, CodecError> {
    let packet = decode_socket(body)?;
    if packet.namespace != handle.namespace() {
        leptos::logging::debug_warn!("ignoring packet for namespace {}", packet.namespace);
        return Ok(Incoming::Continue);
    }

    match packet.kind {
        PacketKind::Connect => {
            leptos::logging::log!("socket namespace {} connected", packet.namespace);
            handle.mark_ready();
            Ok(Incoming::Continue)
        }
        PacketKind::Event => {
            if let Some((name, args)) = packet.event_parts() {
                let payload = args.first().cloned().unwrap_or(Value::Null);
                if handle.dispatch(name, &payload) == 0 {
                    leptos::logging::debug_warn!("no listener for event {name}");
                }
            }
            Ok(Incoming::Continue)
        }
        PacketKind::ConnectError => {
            let reason = packet.connect_error_message().unwrap_or("connect refused").to_owned();
            leptos::logging::warn!("socket connect error: {reason}");
            Ok(Incoming::Closed(reason))
        }
        PacketKind::Disconnect => Ok(Incoming::Closed("server disconnected the namespace".to_owned())),
        PacketKind::Ack | PacketKind::BinaryEvent | PacketKind::BinaryAck => Ok(Incoming::Continue),
    }
}

#[cfg(feature = "csr")]
async fn run(url: String, handle: SocketHandle, rx: futures::channel::mpsc::UnboundedReceiver<super::socket::Outbound>) {
    log::info!("connecting to {url}");
    match connect_and_run(&url, &handle, rx).await {
        Ok(reason) => log::info!("socket closed: {reason}"),
        Err(e) => leptos::logging::warn!("socket error: {e}"),
    }
}

/// Connect to the WebSocket and pump frames until either side finishes.
#[cfg(feature = "csr")]
async fn connect_and_run(
    url: &str,
    handle: &SocketHandle,
    mut rx: futures::channel::mpsc::UnboundedReceiver<super::socket::Outbound>,
) -> Result<String, String> {
    use futures::future::Either;
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    use super::socket::OutboundGate;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    // Writer: drain the outbound queue through the handshake gate.
    let send_task = async {
        let mut gate = OutboundGate::default();
        while let Some(item) = rx.next().await {
            let flush = gate.admit(item);
            for frame in flush.frames {
                if let Err(e) = ws_write.send(Message::Text(frame)).await {
                    return Err(e.to_string());
                }
            }
            if flush.close {
                if let Err(e) = ws_write.close().await {
                    log::debug!("socket close: {e}");
                }
                return Ok("client disconnected".to_owned());
            }
        }
        Ok("outbound queue closed".to_owned())
    };

    // Reader: decode and dispatch inbound frames.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match handle_incoming(handle, &text) {
                    Ok(Incoming::Continue) => {}
                    Ok(Incoming::Closed(reason)) => return Ok(reason),
                    Err(e) => leptos::logging::warn!("undecodable socket packet: {e}"),
                },
                Ok(Message::Bytes(_)) => leptos::logging::warn!("binary socket frame ignored"),
                Err(e) => return Err(e.to_string()),
            }
        }
        Ok("server closed the connection".to_owned())
    };

    match futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await {
        Either::Left((result, _)) | Either::Right((result, _)) => result,
    }
}
