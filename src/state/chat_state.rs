//! Market pe Charcha: the live chat room.

use super::text_input::TextInput;
use chrono::{DateTime, Utc};

/// Text of the simulated reply.
pub const SIMULATED_REPLY: &str = "Valid point! Let's see how the 15min candle closes.";

/// A chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Announcements from the room itself.
    pub system: bool,
}

/// Chat room state.
#[derive(Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Users who answer in the room.
    pub members: Vec<String>,
    pub input: TextInput,
    /// Latest summary.
    pub summary: Option<String>,
    pub summarizing: bool,
    /// Messages scrolled up from the bottom.
    pub scroll: usize,
}

impl ChatState {
    pub fn new(messages: Vec<ChatMessage>, members: Vec<String>) -> Self {
        Self {
            messages,
            members,
            ..Default::default()
        }
    }

    /// Append a message.
    pub fn push(&mut self, author_id: &str, content: &str, now: DateTime<Utc>) {
        self.messages.push(ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at: now,
            system: false,
        });
        self.scroll = 0;
    }
}
