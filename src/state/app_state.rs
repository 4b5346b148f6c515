//! Application-level state.

use super::Notification;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Feed,
    Charcha,
    Clubs,
    Leaderboard,
    Profile,
}

impl View {
    pub const ALL: [View; 5] = [
        Self::Feed,
        Self::Charcha,
        Self::Clubs,
        Self::Leaderboard,
        Self::Profile,
    ];

    /// Heading of the view.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Feed => "My Feed",
            Self::Charcha => "Live Discussion",
            Self::Clubs => "Explore Clubs",
            Self::Leaderboard => "Top Traders",
            Self::Profile => "Profile",
        }
    }

    /// Name in the navigation.
    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::Feed => "Community Feed",
            Self::Charcha => "Market pe Charcha",
            Self::Clubs => "Clubs",
            Self::Leaderboard => "Leaderboard",
            Self::Profile => "My Profile",
        }
    }
}

/// Which field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Writing a post.
    Compose,
    /// Writing a comment on the selected post.
    Comment,
    /// Writing a chat message.
    Chat,
    /// Typing a club search.
    ClubSearch,
    /// Editing the own profile.
    ProfileEdit,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether a real AI service is configured.
    pub online: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Selected row of the leaderboard.
    pub leaderboard_selected: usize,
}

impl AppState {
    /// Check if typing goes to a text field.
    pub fn is_editing(&self) -> bool {
        self.input_mode != InputMode::Normal
    }
}
