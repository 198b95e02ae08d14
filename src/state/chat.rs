//! Conversation and composer state.
//!
//! The conversation is append-only: messages are never edited or removed
//! within a session. `typing` is a single flag, so overlapping turns share it
//! and the first reply clears it.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

/// Greeting seeded into every new conversation.
pub const GREETING: &str = "👋 Hello! I'm your AI assistant. How can I help you today?";

/// Author of a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single conversation entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// Time-ordered unique key (UUID v7 string).
    pub id: String,
    pub sender: Sender,
    /// Raw text as typed or as received; formatting happens at render time.
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub sent_at: f64,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>, sent_at: f64) -> Self {
        Self { id: message_id(sent_at), sender, text: text.into(), sent_at }
    }
}

/// State for the chat widget: history, composer text, and the typing flag.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub typing: bool,
}

impl ChatState {
    /// New conversation opened by a bot greeting.
    pub fn seeded(greeting: &str, now: f64) -> Self {
        Self { messages: vec![ChatMessage::new(Sender::Bot, greeting, now)], ..Self::default() }
    }

    /// Whether the composer holds something worth sending.
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Start a user turn from the composer text.
    ///
    /// Returns the trimmed text to emit, or `None` (leaving everything
    /// untouched) when the input is empty or whitespace.
    pub fn begin_turn(&mut self, now: f64) -> Option<String> {
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_owned();

        self.messages.push(ChatMessage::new(Sender::User, text.clone(), now));
        self.input.clear();
        self.typing = true;
        Some(text)
    }

    /// Finish the open turn with the assistant's reply.
    pub fn complete_turn(&mut self, text: impl Into<String>, now: f64) {
        self.typing = false;
        self.messages.push(ChatMessage::new(Sender::Bot, text, now));
    }

    /// Finish the open turn without a reply.
    pub fn fail_turn(&mut self) {
        self.typing = false;
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn message_id(sent_at: f64) -> String {
    let millis = if sent_at.is_finite() && sent_at > 0.0 { sent_at as u64 } else { 0 };
    let ts = uuid::Timestamp::from_unix(uuid::NoContext, millis / 1000, ((millis % 1000) * 1_000_000) as u32);
    uuid::Uuid::new_v7(ts).to_string()
}
