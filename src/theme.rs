//! Global stylesheet bootstrap.
//!
//! The widget's CSS (layout, bubbles, keyframes for the typing dots, and the
//! element rules for formatted text) is installed into `<head>` once, by an
//! explicit call from the start function. Repeat calls are no-ops.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::sync::atomic::{AtomicBool, Ordering};

/// Stylesheet for the chat widget.
pub const STYLESHEET: &str = include_str!("../style/chat.css");

/// Marker attribute on the injected `<style>` element.
pub const STYLE_MARKER: &str = "data-assistant-chat";

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Install the stylesheet. Returns `true` only for the call that installed it.
pub fn install() -> bool {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return false;
    }
    inject(STYLESHEET);
    true
}

#[cfg(feature = "csr")]
fn inject(css: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        leptos::logging::warn!("no document; stylesheet not installed");
        return;
    };
    let Some(head) = document.head() else {
        leptos::logging::warn!("no <head>; stylesheet not installed");
        return;
    };
    let style = match document.create_element("style") {
        Ok(style) => style,
        Err(e) => {
            leptos::logging::warn!("failed to create <style>: {e:?}");
            return;
        }
    };
    if let Err(e) = style.set_attribute(STYLE_MARKER, "") {
        leptos::logging::warn!("failed to mark <style>: {e:?}");
    }
    style.set_text_content(Some(css));
    if let Err(e) = head.append_child(&style) {
        leptos::logging::warn!("failed to append <style>: {e:?}");
    }
}

#[cfg(not(feature = "csr"))]
fn inject(css: &str) {
    leptos::logging::log!("stylesheet ({} bytes) has no document to attach to", css.len());
}
