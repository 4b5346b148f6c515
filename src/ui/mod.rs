//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod widgets;

pub use layout::{Layout, centered_rect};
pub use widgets::{
    ChartPanel, ChatView, ClubList, ComposerPanel, FeedView, HelpPanel, KeyHints,
    LeaderboardTable, ProfileView, Sidebar, StatusBar, TabBar,
};

use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area());

        StatusBar::render(frame, layout.status_area, store);
        TabBar::render(frame, layout.tab_area, store);

        // Render main content based on current view
        match store.app.current_view {
            View::Feed => FeedView::render(frame, layout.main_area, store),
            View::Charcha => ChatView::render(frame, layout.main_area, store),
            View::Clubs => ClubList::render(frame, layout.main_area, store),
            View::Leaderboard => LeaderboardTable::render(frame, layout.main_area, store),
            View::Profile => ProfileView::render(frame, layout.main_area, store),
        }

        if layout.has_sidebar() {
            Sidebar::render(frame, layout.sidebar_area, store);
        }

        KeyHints::render(frame, layout.hint_area, store);

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::{Action, SeedData};
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    fn screen(store: &Store, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| Ui::render(frame, store)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(SeedData::default(), &Config::default(), tx)
    }

    #[test]
    fn test_every_view_renders() {
        let mut store = store();
        for view in View::ALL {
            store.reduce(Action::SetView(view));
            let text = screen(&store, 120, 40);
            assert!(text.contains("InvestMate"), "{view:?} lost the status bar");
        }
    }

    #[test]
    fn test_feed_shows_posts_and_poll() {
        let mut store = store();
        store.reduce(Action::SetView(View::Feed));
        let text = screen(&store, 120, 60);
        assert!(text.contains("Rahul Trader"));
        assert!(text.contains("$INFY"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut store = store();
        store.reduce(Action::OpenComposer);
        store.reduce(Action::ShowNotification(crate::state::Notification::info("hi")));
        screen(&store, 20, 6);
    }
}
