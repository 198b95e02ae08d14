//! Networking modules for the assistant socket channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `socket` defines the channel contract and its handle, `socket_client`
//! runs the WebSocket transport, and `chat_events` maps the assistant's
//! events onto conversation state.

pub mod chat_events;
pub mod socket;
pub mod socket_client;
