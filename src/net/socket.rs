//! Socket channel handle shared between the UI and the connection task.
//!
//! The handle is the UI's only view of the connection: it queues outbound
//! frames on an unbounded channel drained by the connection task, and it owns
//! the listener table the task dispatches inbound events to. It is cheap to
//! clone and `Send + Sync`, so it can live in Leptos contexts and cleanups.

#[cfg(test)]
#[path = "socket_test.rs"]
mod socket_test;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use packets::{SocketPacket, encode_message};
use serde_json::Value;

/// Event-based duplex channel to the assistant backend.
pub trait SocketChannel {
    /// Register `callback` for every inbound event named `event`.
    fn on<F>(&self, event: &str, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static;

    /// Queue one event for sending. Fire-and-forget: returns `false` only
    /// when the channel has already been disconnected.
    fn emit(&self, event: &str, payload: Value) -> bool;

    /// Release the connection. Only the first call has an effect.
    fn disconnect(&self);
}

/// Work item for the connection task's writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    /// Protocol frame written immediately (handshake, pong).
    Control(String),
    /// Application event, held until the namespace connect is acknowledged.
    Emit(String),
    /// Namespace connect acknowledged; release held events.
    Ready,
    /// Write the disconnect frame (when connected) and close the transport.
    Close(String),
}

/// Frames the writer should put on the wire for one [`Outbound`] item.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Flush {
    pub frames: Vec<String>,
    /// Close the transport after writing `frames`.
    pub close: bool,
}

/// Orders outbound frames around the namespace handshake.
///
/// Events queued before the server acknowledges the namespace connect are
/// held and released in order on [`Outbound::Ready`]. Held events are
/// dropped if the channel closes first.
#[derive(Debug, Default)]
pub struct OutboundGate {
    ready: bool,
    held: Vec<String>,
}

impl OutboundGate {
    pub fn admit(&mut self, item: Outbound) -> Flush {
        match item {
            Outbound::Control(frame) => Flush { frames: vec![frame], close: false },
            Outbound::Ready => {
                self.ready = true;
                Flush { frames: std::mem::take(&mut self.held), close: false }
            }
            Outbound::Emit(frame) if self.ready => Flush { frames: vec![frame], close: false },
            Outbound::Emit(frame) => {
                self.held.push(frame);
                Flush::default()
            }
            Outbound::Close(frame) => {
                let frames = if self.ready { vec![frame] } else { Vec::new() };
                self.held.clear();
                Flush { frames, close: true }
            }
        }
    }

    /// Number of events waiting for the handshake.
    pub fn held(&self) -> usize {
        self.held.len()
    }
}

type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Client-side handle to one Socket.IO namespace connection.
#[derive(Clone)]
pub struct SocketHandle {
    namespace: Arc<str>,
    tx: UnboundedSender<Outbound>,
    listeners: Arc<Mutex<HashMap<String, Vec<Listener>>>>,
    closed: Arc<AtomicBool>,
}

impl std::fmt::Debug for SocketHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocketHandle")
            .field("namespace", &self.namespace)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl SocketHandle {
    /// Create a handle and the receiving end its connection task drains.
    pub fn new(namespace: &str) -> (Self, UnboundedReceiver<Outbound>) {
        let (tx, rx) = unbounded();
        let handle = Self {
            namespace: Arc::from(namespace),
            tx,
            listeners: Arc::new(Mutex::new(HashMap::new())),
            closed: Arc::new(AtomicBool::new(false)),
        };
        (handle, rx)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Invoke every listener registered for `event` with `payload`.
    ///
    /// Returns how many listeners ran. Listeners are cloned out of the table
    /// before running, so a listener may register further listeners.
    pub fn dispatch(&self, event: &str, payload: &Value) -> usize {
        let listeners = match self.listeners.lock() {
            Ok(table) => table.get(event).cloned().unwrap_or_default(),
            Err(e) => {
                leptos::logging::warn!("socket listener table poisoned: {e}");
                return 0;
            }
        };
        for listener in &listeners {
            listener(payload);
        }
        listeners.len()
    }

    /// Queue a protocol frame ahead of any held events.
    pub(crate) fn send_control(&self, frame: String) -> bool {
        self.tx.unbounded_send(Outbound::Control(frame)).is_ok()
    }

    /// Signal that the namespace connect was acknowledged.
    pub(crate) fn mark_ready(&self) -> bool {
        self.tx.unbounded_send(Outbound::Ready).is_ok()
    }
}

impl SocketChannel for SocketHandle {
    fn on<F>(&self, event: &str, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        match self.listeners.lock() {
            Ok(mut table) => table.entry(event.to_owned()).or_default().push(Arc::new(callback)),
            Err(e) => leptos::logging::warn!("socket listener table poisoned: {e}"),
        }
    }

    fn emit(&self, event: &str, payload: Value) -> bool {
        if self.is_closed() {
            return false;
        }
        let frame = encode_message(&SocketPacket::event(&self.namespace, event, vec![payload]));
        self.tx.unbounded_send(Outbound::Emit(frame)).is_ok()
    }

    fn disconnect(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let frame = encode_message(&SocketPacket::disconnect(&self.namespace));
        if self.tx.unbounded_send(Outbound::Close(frame)).is_err() {
            leptos::logging::log!("socket already released before disconnect");
        }
        self.tx.close_channel();
    }
}
