//! Input event types and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl Key {
    /// Map a terminal key code. Keys the app has no use for map to `None`.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => return None,
        })
    }

    /// Parse the key part of a binding string such as `"Enter"` or `"q"`.
    fn parse(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Some(match lower.as_str() {
            "enter" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "backtab" => Key::BackTab,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "space" => Key::Char(' '),
            s if s.len() > 1 && s.starts_with('f') => Key::F(s[1..].parse().ok()?),
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Key::Char(c)
            }
        })
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl InputEvent {
    /// Create a new input event.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// An unmodified key press.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::default())
    }

    /// Convert a terminal key event.
    pub fn from_key_event(event: KeyEvent) -> Option<Self> {
        Some(Self {
            key: Key::from_code(event.code)?,
            modifiers: Modifiers::from(event.modifiers),
        })
    }

    /// Get the character if this is a character input.
    pub fn char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) => Some(c),
            _ => None,
        }
    }

    /// Check if Ctrl is held.
    pub fn ctrl(&self) -> bool {
        self.modifiers.ctrl
    }

    /// Check if Alt is held.
    pub fn alt(&self) -> bool {
        self.modifiers.alt
    }

    /// A character typed into a text field: no Ctrl or Alt.
    pub fn typed_char(&self) -> Option<char> {
        if self.ctrl() || self.alt() {
            return None;
        }
        self.char()
    }

    /// Digit typed with Alt held, e.g. Alt+2 gives `Some(2)`.
    pub fn alt_digit(&self) -> Option<u32> {
        if !self.alt() || self.ctrl() {
            return None;
        }
        self.char()?.to_digit(10)
    }

    /// Check if this matches a key binding string (e.g., "Ctrl+q", "Enter").
    ///
    /// Shift is ignored for character keys since terminals report it for
    /// symbols like `?`; letters match either case.
    pub fn matches(&self, binding: &str) -> bool {
        let mut expected_ctrl = false;
        let mut expected_alt = false;
        let mut expected_shift = false;
        let mut expected_key = "";

        for part in binding.split('+').filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "ctrl" => expected_ctrl = true,
                "alt" => expected_alt = true,
                "shift" => expected_shift = true,
                _ => expected_key = part,
            }
        }
        // "+" on its own, or "Ctrl++"
        if expected_key.is_empty() && binding.ends_with('+') {
            expected_key = "+";
        }

        let Some(key) = Key::parse(expected_key) else {
            return false;
        };

        if self.modifiers.ctrl != expected_ctrl || self.modifiers.alt != expected_alt {
            return false;
        }

        match (key, self.key) {
            (Key::Char(want), Key::Char(got)) => {
                want == got || want.to_ascii_lowercase() == got.to_ascii_lowercase()
            }
            (want, got) => want == got && self.modifiers.shift == expected_shift,
        }
    }
}
