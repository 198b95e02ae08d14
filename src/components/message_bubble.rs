//! One conversation entry: avatar, formatted bubble, and time label.

use leptos::prelude::*;

use crate::state::chat::{ChatMessage, Sender};
use crate::util::clock::clock_label;
use crate::util::format::render_message;

/// Render a message. The text is formatted to markup and injected as HTML;
/// with `escape_markup` set, the raw text is escaped first.
#[component]
pub fn MessageBubble(message: ChatMessage, escape_markup: bool) -> impl IntoView {
    let html = render_message(&message.text, escape_markup);
    let time = clock_label(message.sent_at);
    let is_user = message.sender == Sender::User;

    let row_class = if is_user { "chat-row chat-row--outgoing" } else { "chat-row chat-row--incoming" };
    let bubble_class = if is_user { "chat-bubble chat-bubble--user" } else { "chat-bubble chat-bubble--bot" };

    view! {
        <div class=row_class data-message-id=message.id>
            {(!is_user).then(|| view! { <div class="chat-avatar chat-avatar--bot">"AI"</div> })}
            <div class="chat-message">
                <div class=bubble_class>
                    <div inner_html=html></div>
                </div>
                <div class="chat-time">{time}</div>
            </div>
        </div>
    }
}
