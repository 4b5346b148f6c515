//! `@mention` autocomplete for the post composer.
//!
//! The machine is either idle or suggesting users for a partial handle typed
//! right before the cursor. Cursor positions are character indices.

use crate::events::Key;
use crate::state::{Directory, User};
use regex::Regex;
use std::sync::LazyLock;

/// `@` at the start of the text or after whitespace, then the partial handle,
/// anchored at the cursor.
static TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)@([A-Za-z0-9_]*)$").expect("mention trigger pattern is valid")
});

/// Autocomplete state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MentionState {
    #[default]
    Idle,
    Suggesting {
        /// Partial handle typed after the `@`.
        query: String,
        /// Cursor position the query was captured at.
        cursor: usize,
        /// Index of the highlighted candidate.
        highlighted: usize,
    },
}

/// Text and cursor after inserting a mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionEdit {
    pub text: String,
    pub cursor: usize,
}

/// What a key press did to the autocomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key not consumed; the composer should handle it.
    Ignored,
    /// Highlight moved.
    Moved,
    /// A candidate was inserted.
    Committed(MentionEdit),
    /// Suggestions closed without editing.
    Dismissed,
}

/// Mention autocomplete state machine.
#[derive(Debug, Clone, Default)]
pub struct MentionAutocomplete {
    state: MentionState,
}

impl MentionAutocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MentionState {
        &self.state
    }

    pub fn is_suggesting(&self) -> bool {
        matches!(self.state, MentionState::Suggesting { .. })
    }

    pub fn query(&self) -> Option<&str> {
        match &self.state {
            MentionState::Suggesting { query, .. } => Some(query),
            MentionState::Idle => None,
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        match self.state {
            MentionState::Suggesting { highlighted, .. } => Some(highlighted),
            MentionState::Idle => None,
        }
    }

    /// Force the machine back to idle.
    pub fn reset(&mut self) {
        self.state = MentionState::Idle;
    }

    /// Re-evaluate the trigger after the text or cursor changed.
    pub fn on_text_change(&mut self, text: &str, cursor: usize) {
        let before = &text[..byte_offset(text, cursor)];

        self.state = match TRIGGER_RE.captures(before).and_then(|caps| caps.get(1)) {
            Some(query) => MentionState::Suggesting {
                query: query.as_str().to_string(),
                cursor,
                highlighted: 0,
            },
            None => MentionState::Idle,
        };
    }

    /// Users matching the current query, in directory order.
    ///
    /// Empty while idle. An empty list while suggesting hides the dropdown
    /// but keeps tracking the query.
    pub fn candidates<'a>(&self, directory: &'a Directory) -> Vec<&'a User> {
        match self.query() {
            Some(query) => directory.search(query),
            None => Vec::new(),
        }
    }

    /// Whether the suggestion dropdown is visible.
    pub fn dropdown_open(&self, directory: &Directory) -> bool {
        !self.candidates(directory).is_empty()
    }

    /// Handle a navigation key. Only consumes keys while the dropdown is open.
    pub fn on_key(&mut self, key: Key, text: &str, directory: &Directory) -> KeyOutcome {
        let candidates = self.candidates(directory);
        let count = candidates.len();
        if count == 0 {
            return KeyOutcome::Ignored;
        }

        let MentionState::Suggesting { highlighted, .. } = &mut self.state else {
            return KeyOutcome::Ignored;
        };
        let current = (*highlighted).min(count - 1);

        match key {
            Key::Down => {
                *highlighted = (current + 1) % count;
                KeyOutcome::Moved
            }
            Key::Up => {
                *highlighted = (current + count - 1) % count;
                KeyOutcome::Moved
            }
            Key::Enter => {
                let user = candidates[current].clone();
                match self.commit(text, &user) {
                    Some(edit) => KeyOutcome::Committed(edit),
                    None => KeyOutcome::Ignored,
                }
            }
            Key::Escape => {
                self.reset();
                KeyOutcome::Dismissed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Commit the `index`-th candidate directly (pointer-style selection).
    pub fn select(
        &mut self,
        index: usize,
        text: &str,
        directory: &Directory,
    ) -> Option<MentionEdit> {
        let user = self.candidates(directory).get(index).map(|u| (*u).clone())?;
        self.commit(text, &user)
    }

    /// Insert `user` at the tracked `@` and return to idle.
    pub fn commit(&mut self, text: &str, user: &User) -> Option<MentionEdit> {
        let MentionState::Suggesting { cursor, .. } = self.state else {
            return None;
        };
        self.reset();
        Some(insert_mention(text, cursor, &user.handle))
    }
}

/// Replace the text from the last `@` at or before `cursor` through `cursor`
/// with `@handle `, returning the new text and the cursor after the space.
pub fn insert_mention(text: &str, cursor: usize, handle: &str) -> MentionEdit {
    let cursor_byte = byte_offset(text, cursor);
    let before = &text[..cursor_byte];
    let at = before.rfind('@').unwrap_or(cursor_byte);
    let prefix = &text[..at];
    let suffix = &text[cursor_byte..];

    let new_text = format!("{prefix}@{handle} {suffix}");
    let new_cursor = prefix.chars().count() + handle.chars().count() + 2;

    MentionEdit {
        text: new_text,
        cursor: new_cursor,
    }
}

/// Byte offset of the `char_index`-th character, clamped to the end.
pub(crate) fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
