//! Single text field with a character cursor.

use crate::content::mention::byte_offset;

/// Editable text with a cursor counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field prefilled with `value`, cursor at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the field holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Replace the text, cursor at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    /// Move the cursor, clamped to the text.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len());
    }

    pub fn insert(&mut self, c: char) {
        let at = byte_offset(&self.value, self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = byte_offset(&self.value, self.cursor);
        self.value.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = byte_offset(&self.value, self.cursor);
        self.value.remove(at);
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = byte_offset(&self.value, self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Take the text out, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_counts_characters() {
        let mut input = TextInput::with_value("₹10");
        assert_eq!(input.cursor(), 3);

        input.home();
        input.right();
        input.insert('X');
        assert_eq!(input.value(), "₹X10");
        assert_eq!(input.cursor(), 2);

        input.backspace();
        input.backspace();
        assert_eq!(input.value(), "10");
        assert_eq!(input.cursor(), 0);

        input.backspace();
        assert_eq!(input.value(), "10");
    }

    #[test]
    fn test_delete_and_bounds() {
        let mut input = TextInput::with_value("ab");
        input.delete();
        assert_eq!(input.value(), "ab");

        input.left();
        input.delete();
        assert_eq!(input.value(), "a");

        input.set_cursor(99);
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_insert_str_and_take() {
        let mut input = TextInput::new();
        input.insert_str("hi @");
        assert_eq!(input.cursor(), 4);
        assert!(!input.is_blank());

        assert_eq!(input.take(), "hi @");
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
