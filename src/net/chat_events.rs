//! The assistant event contract and its effect on conversation state.
//!
//! | Direction | Event | Payload |
//! |---|---|---|
//! | client → server | `ai-res` | trimmed user text |
//! | server → client | `ai-response` | `{ "result": string }` |
//! | server → client | `ai-error` | any value |
//!
//! Every turn ends at its first reply or error. There is no retry and no
//! user-visible error message.

#[cfg(test)]
#[path = "chat_events_test.rs"]
mod chat_events_test;

use leptos::prelude::{RwSignal, Update, on_cleanup};
use serde_json::Value;

use crate::net::socket::SocketChannel;
use crate::state::chat::ChatState;
use crate::util::clock::now_ms;

/// Outbound user turn.
pub const ASK_EVENT: &str = "ai-res";
/// Inbound assistant reply.
pub const RESPONSE_EVENT: &str = "ai-response";
/// Inbound failure for the open turn.
pub const ERROR_EVENT: &str = "ai-error";

/// Whether a key press submits the composer: Enter without Shift, outside an
/// IME composition (that Enter only confirms the composed text).
pub fn is_submit_key(key: &str, shift: bool, composing: bool) -> bool {
    key == "Enter" && !shift && !composing
}

/// Send the composer text as a new turn.
///
/// Returns `false` when the input was blank and nothing happened.
pub fn send_message<C: SocketChannel>(state: &mut ChatState, channel: &C, now: f64) -> bool {
    let Some(text) = state.begin_turn(now) else {
        return false;
    };
    if !channel.emit(ASK_EVENT, Value::String(text)) {
        leptos::logging::warn!("{ASK_EVENT} not queued: socket channel is closed");
    }
    true
}

/// Text of an `ai-response` payload, when it carries a string `result`.
pub fn response_text(payload: &Value) -> Option<&str> {
    payload.get("result")?.as_str()
}

/// Close the open turn with the assistant's reply.
pub fn apply_ai_response(state: &mut ChatState, payload: &Value, now: f64) {
    let text = response_text(payload).unwrap_or_else(|| {
        leptos::logging::warn!("{RESPONSE_EVENT} without a string result: {payload}");
        ""
    });
    state.complete_turn(text, now);
}

/// Close the open turn after a backend error. Developer console only.
pub fn apply_ai_error(state: &mut ChatState, payload: &Value) {
    leptos::logging::error!("{ERROR_EVENT}: {payload}");
    state.fail_turn();
}

/// Register the assistant listeners on `channel`.
pub fn register_chat_listeners<C: SocketChannel>(channel: &C, chat: RwSignal<ChatState>) {
    channel.on(RESPONSE_EVENT, move |payload| {
        chat.update(|c| apply_ai_response(c, payload, now_ms()));
    });
    channel.on(ERROR_EVENT, move |payload| {
        chat.update(|c| apply_ai_error(c, payload));
    });
}

/// Bind `channel` to the current reactive owner.
///
/// Listeners are registered now; the channel is disconnected when the owner
/// is cleaned up, whatever state the connection is in by then.
pub fn attach_chat_session<C>(channel: C, chat: RwSignal<ChatState>)
where
    C: SocketChannel + Send + Sync + 'static,
{
    register_chat_listeners(&channel, chat);
    on_cleanup(move || channel.disconnect());
}
