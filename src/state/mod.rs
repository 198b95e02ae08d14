//! Client-side state for the chat widget.
//!
//! DESIGN
//! ======
//! State is held in plain structs with small mutation methods so protocol
//! handlers and tests can drive it without a reactive runtime. Components wrap
//! it in an `RwSignal` provided via context.

pub mod chat;
