//! Text input and send button.
//!
//! Enter (without Shift, and not while an IME composition is open) and the
//! button both send. The button is disabled
//! while the input is blank. Sending while a reply is pending is allowed.

use leptos::prelude::*;

use crate::net::chat_events::{is_submit_key, send_message};
use crate::net::socket::SocketHandle;
use crate::state::chat::ChatState;
use crate::util::clock::now_ms;

#[component]
pub fn Composer(socket: SocketHandle) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let socket = StoredValue::new(socket);

    let can_send = Memo::new(move |_| chat.with(ChatState::can_send));

    let do_send = move || {
        socket.with_value(|socket| {
            chat.update(|c| {
                send_message(c, socket, now_ms());
            });
        });
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if is_submit_key(&ev.key(), ev.shift_key(), ev.is_composing()) {
            ev.prevent_default();
            do_send();
        }
    };

    let send_class = move || {
        if can_send.get() { "chat-composer__send" } else { "chat-composer__send chat-composer__send--idle" }
    };

    view! {
        <div class="chat-composer">
            <input
                class="chat-composer__input"
                type="text"
                placeholder="Type your message..."
                prop:value=move || chat.with(|c| c.input.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    chat.update(|c| c.input = value);
                }
                on:keydown=on_keydown
            />
            <button
                class=send_class
                aria-label="Send message"
                on:click=move |_| do_send()
                disabled=move || !can_send.get()
            >
                <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                    <path d="M22 2L11 13M22 2l-7 20-4-9-9-4 20-7z"></path>
                </svg>
            </button>
        </div>
    }
}
