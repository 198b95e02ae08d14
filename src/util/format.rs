//! Lightweight markup for assistant text.
//!
//! Rules run as independent global substitutions, in order:
//! `**bold**`, then `*italic*`, then `` `code` ``, then newlines to `<br/>`.
//! Each match is non-greedy and never spans a line terminator.
//!
//! TRADE-OFFS
//! ==========
//! [`format_message`] does not escape its input: markup already present in
//! the text is rendered as markup. [`format_message_escaped`] escapes first
//! and is selected by `ChatConfig::escape_markup`.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use std::sync::OnceLock;

use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

// `[^\n\r\x{2028}\x{2029}]` is "any character except a line terminator".
const RULE_SOURCES: [(&str, &str); 3] = [
    (r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*", "<strong>${1}</strong>"),
    (r"\*([^\n\r\x{2028}\x{2029}]*?)\*", "<em>${1}</em>"),
    (r"`([^\n\r\x{2028}\x{2029}]*?)`", "<code>${1}</code>"),
];

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        RULE_SOURCES
            .iter()
            .filter_map(|&(source, replacement)| match Regex::new(source) {
                Ok(pattern) => Some(Rule { pattern, replacement }),
                Err(e) => {
                    leptos::logging::warn!("format rule {source:?} failed to compile: {e}");
                    None
                }
            })
            .collect()
    })
}

/// Rewrite raw message text into display markup.
pub fn format_message(text: &str) -> String {
    let mut out = text.to_owned();
    for rule in rules() {
        out = rule.pattern.replace_all(&out, rule.replacement).into_owned();
    }
    out.replace('\n', "<br/>")
}

/// Escape HTML-significant characters, then apply [`format_message`].
pub fn format_message_escaped(text: &str) -> String {
    format_message(&escape_html(text))
}

/// Pick the formatter for the configured escaping mode.
pub fn render_message(text: &str, escape_markup: bool) -> String {
    if escape_markup { format_message_escaped(text) } else { format_message(text) }
}

/// Replace `& < > " '` with their HTML entities.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
