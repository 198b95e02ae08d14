//! The chat widget: header, transcript, typing indicator, and composer.
//!
//! Mounting opens the socket channel and binds it to this component's
//! owner, so unmounting disconnects it exactly once.

#[cfg(test)]
#[path = "chat_widget_test.rs"]
mod chat_widget_test;

use leptos::prelude::*;

use crate::components::chat_header::ChatHeader;
use crate::components::composer::Composer;
use crate::components::message_bubble::MessageBubble;
use crate::components::typing_indicator::TypingIndicator;
use crate::config::ChatConfig;
use crate::net::chat_events::attach_chat_session;
use crate::net::socket_client;
use crate::state::chat::{ChatMessage, ChatState};

#[component]
pub fn ChatWidget() -> impl IntoView {
    let config = expect_context::<ChatConfig>();
    let chat = expect_context::<RwSignal<ChatState>>();

    let socket = socket_client::open(&config.endpoint);
    attach_chat_session(socket.clone(), chat);

    let (message_count, messages) = transcript(chat);
    let typing = Memo::new(move |_| chat.with(|c| c.typing));
    // Changes whenever a message is appended or the typing flag flips.
    let scroll_key = Memo::new(move |_| (message_count.get(), typing.get()));

    let end_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        scroll_key.track();

        #[cfg(feature = "csr")]
        {
            if let Some(el) = end_ref.get() {
                let options = web_sys::ScrollIntoViewOptions::new();
                options.set_behavior(web_sys::ScrollBehavior::Smooth);
                el.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    });

    let escape_markup = config.escape_markup;

    view! {
        <div class="chat-shell">
            <div class="chat-app">
                <ChatHeader title=config.title.clone() status=config.status.clone()/>

                <div class="chat-messages">
                    <For
                        each=move || messages.get()
                        key=|message: &ChatMessage| message.id.clone()
                        children=move |message: ChatMessage| {
                            view! { <MessageBubble message=message escape_markup=escape_markup/> }
                        }
                    />
                    <Show when=move || typing.get()>
                        <TypingIndicator/>
                    </Show>
                    <div class="chat-messages__end" node_ref=end_ref></div>
                </div>

                <Composer socket=socket/>
            </div>
        </div>
    }
}

/// Message count and history, both recomputed only when a message is
/// appended. The history is append-only, so its length is a complete change
/// key; composer keystrokes leave both untouched.
pub(crate) fn transcript(chat: RwSignal<ChatState>) -> (Memo<usize>, Memo<Vec<ChatMessage>>) {
    let count = Memo::new(move |_| chat.with(|c| c.messages.len()));
    let messages = Memo::new(move |_| {
        count.track();
        chat.with_untracked(|c| c.messages.clone())
    });
    (count, messages)
}
