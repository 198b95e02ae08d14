//! # assistant-chat
//!
//! Leptos + WASM single-page chat widget for a personal AI assistant.
//!
//! The widget keeps an append-only conversation, sends each user turn over a
//! Socket.IO channel as an `ai-res` event, and appends the assistant's
//! `ai-response` reply. Message text gets a light inline formatting pass
//! (bold, italic, code, line breaks) before it is injected as HTML.
//!
//! Browser code sits behind the `csr` feature; everything else builds and
//! tests natively. The wire codec lives in the `packets` crate.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod theme;
pub mod util;

/// WASM entry point: install logging and the stylesheet, then mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    theme::install();
    leptos::mount::mount_to_body(app::App);
}
