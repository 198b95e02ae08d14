//! UI components for the chat widget.

pub mod chat_header;
pub mod chat_widget;
pub mod composer;
pub mod message_bubble;
pub mod typing_indicator;
