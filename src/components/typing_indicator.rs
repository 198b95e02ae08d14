//! Three bouncing dots shown while a reply is pending.

use leptos::prelude::*;

#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="chat-row chat-row--incoming" aria-live="polite" aria-label="Assistant is typing">
            <div class="chat-avatar chat-avatar--bot">"AI"</div>
            <div class="chat-message">
                <div class="chat-typing">
                    <span class="chat-dot"></span>
                    <span class="chat-dot"></span>
                    <span class="chat-dot"></span>
                </div>
            </div>
        </div>
    }
}
