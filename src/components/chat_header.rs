//! Title bar with the assistant avatar and status line.

use leptos::prelude::*;

#[component]
pub fn ChatHeader(title: String, status: String) -> impl IntoView {
    view! {
        <div class="chat-header">
            <div class="chat-header__content">
                <div class="chat-avatar chat-avatar--header">"AI"</div>
                <div>
                    <div class="chat-header__title">{title}</div>
                    <div class="chat-header__status">{status}</div>
                </div>
            </div>
        </div>
    }
}
