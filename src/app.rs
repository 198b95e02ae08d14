//! Root application component and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::chat_widget::ChatWidget;
use crate::config::ChatConfig;
use crate::state::chat::ChatState;
use crate::util::clock::now_ms;

/// Root application component.
///
/// Resolves config, seeds the conversation with the greeting, and provides
/// both as context for the widget.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ChatConfig::load();
    let chat = RwSignal::new(ChatState::seeded(&config.greeting, now_ms()));
    let title = config.title.clone();

    provide_context(config);
    provide_context(chat);

    view! {
        <Title text=title/>
        <ChatWidget/>
    }
}
