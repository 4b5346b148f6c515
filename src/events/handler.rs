//! Event handler for processing input events.

use super::{InputEvent, Key};
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, ComposerField, InputMode, Store, View};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long to wait for input before emitting a tick.
    tick_rate: Duration,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Default)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    show_help: bool,
    composer_field: ComposerField,
    mention_open: bool,
    selected_post_id: Option<String>,
    selected_post_author: Option<String>,
    highlighted_option_id: Option<String>,
    selected_club_id: Option<String>,
    leaderboard_user_id: Option<String>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, tick_rate: Duration) -> Self {
        Self {
            keybindings,
            tick_rate,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        let post = store.feed.selected_post();
        let leaderboard = store.directory.leaderboard();
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            show_help: store.app.show_help,
            composer_field: store.feed.composer.field,
            mention_open: store.feed.composer.mention.dropdown_open(&store.directory),
            selected_post_id: post.map(|p| p.id.clone()),
            selected_post_author: post.map(|p| p.author_id.clone()),
            highlighted_option_id: store.feed.highlighted_option().map(str::to_string),
            selected_club_id: store.clubs.selected_club().map(|c| c.id.clone()),
            leaderboard_user_id: leaderboard
                .get(store.app.leaderboard_selected)
                .map(|u| u.id.clone()),
        });
    }

    /// Get the next action from user input, or a tick when none arrives.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if !event::poll(self.tick_rate)? {
            return Ok(Some(Action::Tick));
        }

        let action = match event::read()? {
            CrosstermEvent::Key(key) => self.handle_key(key),
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(mouse),
            CrosstermEvent::Paste(text) => self.handle_paste(text),
            // Terminal will automatically redraw
            _ => None,
        };
        Ok(action)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = InputEvent::from_key_event(key)?;
        let snapshot = self.store_snapshot.as_ref()?;
        self.map_input(input, snapshot)
    }

    fn map_input(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(input, snapshot),
            InputMode::Compose => self.handle_compose_mode(input, snapshot),
            mode => self.handle_line_mode(input, mode),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::SelectPrev),
            MouseEventKind::ScrollDown => Some(Action::SelectNext),
            _ => None,
        }
    }

    fn handle_paste(&self, text: String) -> Option<Action> {
        let snapshot = self.store_snapshot.as_ref()?;
        (snapshot.input_mode != InputMode::Normal).then_some(Action::Paste(text))
    }

    fn handle_normal_mode(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let kb = &self.keybindings;

        if snapshot.show_help {
            return (input.matches(&kb.help) || input.matches(&kb.back))
                .then_some(Action::ToggleHelp);
        }

        // Global shortcuts
        if input.matches(&kb.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&kb.help) {
            return Some(Action::ToggleHelp);
        }
        if input.matches(&kb.back) {
            return Some(Action::DismissNotification);
        }
        if input.matches(&kb.compose) {
            return Some(Action::OpenComposer);
        }

        // View switching
        let views = [
            (&kb.feed, View::Feed),
            (&kb.charcha, View::Charcha),
            (&kb.clubs, View::Clubs),
            (&kb.leaderboard, View::Leaderboard),
            (&kb.profile, View::Profile),
        ];
        if let Some((_, view)) = views.iter().find(|(binding, _)| input.matches(binding)) {
            return Some(Action::SetView(*view));
        }
        if input.key == Key::Tab || input.key == Key::BackTab {
            let i = View::ALL
                .iter()
                .position(|v| *v == snapshot.current_view)
                .unwrap_or(0);
            let len = View::ALL.len();
            let next = if input.key == Key::Tab { i + 1 } else { i + len - 1 };
            return Some(Action::SetView(View::ALL[next % len]));
        }

        // Navigation
        if input.matches(&kb.up) || input.key == Key::Up {
            return Some(Action::SelectPrev);
        }
        if input.matches(&kb.down) || input.key == Key::Down {
            return Some(Action::SelectNext);
        }
        match input.key {
            Key::Home => return Some(Action::GoToTop),
            Key::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // View-specific actions
        match snapshot.current_view {
            View::Feed => self.handle_feed_view(input, snapshot),
            View::Charcha => self.handle_charcha_view(input),
            View::Clubs => self.handle_clubs_view(input, snapshot),
            View::Leaderboard => {
                let user_id = snapshot.leaderboard_user_id.clone()?;
                (input.matches(&kb.select) || input.matches(&kb.author))
                    .then_some(Action::ShowProfile(user_id))
            }
            View::Profile => input.matches(&kb.edit).then_some(Action::StartProfileEdit),
        }
    }

    fn handle_feed_view(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let kb = &self.keybindings;

        // Chart controls work without a selected post
        if input.matches(&kb.range_prev) {
            return Some(Action::ChartRangePrev);
        }
        if input.matches(&kb.range_next) {
            return Some(Action::ChartRangeNext);
        }
        if input.matches(&kb.chart_kind) {
            return Some(Action::CycleChartKind);
        }

        let post_id = snapshot.selected_post_id.clone()?;

        if input.matches(&kb.like) {
            return Some(Action::ToggleLike(post_id));
        }
        if input.matches(&kb.comments) || input.matches(&kb.select) {
            return Some(Action::ToggleComments(post_id));
        }
        if input.matches(&kb.reply) {
            return Some(Action::StartComment);
        }
        if input.matches(&kb.analyze) {
            return Some(Action::AnalyzePost(post_id));
        }
        if input.matches(&kb.poll_option) {
            return Some(Action::CyclePollOption);
        }
        if input.matches(&kb.vote) {
            let option_id = snapshot.highlighted_option_id.clone()?;
            return Some(Action::Vote { post_id, option_id });
        }
        if input.matches(&kb.author) {
            return snapshot.selected_post_author.clone().map(Action::ShowProfile);
        }

        None
    }

    fn handle_charcha_view(&self, input: InputEvent) -> Option<Action> {
        let kb = &self.keybindings;

        if input.matches(&kb.input) || input.matches(&kb.select) {
            return Some(Action::SetInputMode(InputMode::Chat));
        }
        if input.matches(&kb.summarize) {
            return Some(Action::SummarizeChat);
        }

        None
    }

    fn handle_clubs_view(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let kb = &self.keybindings;

        if input.matches(&kb.input) {
            return Some(Action::SetInputMode(InputMode::ClubSearch));
        }
        if input.matches(&kb.category) {
            return Some(Action::CycleClubCategory);
        }
        if input.matches(&kb.select) {
            return snapshot.selected_club_id.clone().map(Action::ToggleJoinClub);
        }

        None
    }

    fn handle_compose_mode(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        if input.ctrl() {
            return match input.char()?.to_ascii_lowercase() {
                's' => Some(Action::SubmitPost),
                'p' => Some(Action::TogglePollMode),
                't' => Some(Action::InsertHashtag),
                'a' => Some(Action::AddPollOption),
                'd' => Some(Action::RemovePollOption),
                _ => None,
            };
        }

        if snapshot.mention_open
            && let Some(digit) = input.alt_digit()
            && digit > 0
        {
            return Some(Action::SelectMention(digit as usize - 1));
        }

        match input.key {
            Key::Tab => return Some(Action::NextField),
            Key::BackTab => return Some(Action::PrevField),
            _ => {}
        }

        if snapshot.composer_field == ComposerField::Body {
            if matches!(input.key, Key::Up | Key::Down | Key::Enter | Key::Escape) {
                return Some(Action::MentionKey(input.key));
            }
        } else {
            match input.key {
                Key::Escape => return Some(Action::CloseComposer),
                Key::Enter => return Some(Action::NextField),
                _ => {}
            }
        }

        edit_action(input)
    }

    /// Single-line fields: comment, chat, club search, profile form.
    fn handle_line_mode(&self, input: InputEvent, mode: InputMode) -> Option<Action> {
        match input.key {
            Key::Escape => Some(match mode {
                InputMode::ProfileEdit => Action::CancelProfileEdit,
                _ => Action::SetInputMode(InputMode::Normal),
            }),
            Key::Enter => Some(match mode {
                InputMode::Comment => Action::SubmitComment,
                InputMode::Chat => Action::SendChatMessage,
                InputMode::ProfileEdit => Action::SaveProfile,
                _ => Action::SetInputMode(InputMode::Normal),
            }),
            Key::Tab | Key::Down if mode == InputMode::ProfileEdit => Some(Action::NextField),
            Key::BackTab | Key::Up if mode == InputMode::ProfileEdit => Some(Action::PrevField),
            _ => edit_action(input),
        }
    }
}

/// Cursor movement, deletion and typing shared by all text fields.
fn edit_action(input: InputEvent) -> Option<Action> {
    match input.key {
        Key::Backspace => Some(Action::Backspace),
        Key::Delete => Some(Action::DeleteChar),
        Key::Left => Some(Action::CursorLeft),
        Key::Right => Some(Action::CursorRight),
        Key::Home => Some(Action::CursorHome),
        Key::End => Some(Action::CursorEnd),
        _ => input.typed_char().map(Action::InsertChar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Modifiers;

    fn handler() -> EventHandler {
        EventHandler::new(KeyBindings::default(), Duration::from_millis(250))
    }

    fn feed_snapshot() -> StoreSnapshot {
        StoreSnapshot {
            selected_post_id: Some("103".to_string()),
            selected_post_author: Some("5".to_string()),
            highlighted_option_id: Some("opt2".to_string()),
            ..Default::default()
        }
    }

    fn press(c: char) -> InputEvent {
        InputEvent::plain(Key::Char(c))
    }

    fn with(key: Key, modifiers: Modifiers) -> InputEvent {
        InputEvent::new(key, modifiers)
    }

    #[test]
    fn test_feed_keys() {
        let h = handler();
        let s = feed_snapshot();

        assert!(matches!(h.map_input(press('l'), &s), Some(Action::ToggleLike(id)) if id == "103"));
        assert!(matches!(
            h.map_input(press('v'), &s),
            Some(Action::Vote { post_id, option_id }) if post_id == "103" && option_id == "opt2"
        ));
        assert!(matches!(h.map_input(press('u'), &s), Some(Action::ShowProfile(id)) if id == "5"));
        assert!(matches!(h.map_input(press(']'), &s), Some(Action::ChartRangeNext)));
        assert!(matches!(h.map_input(press('n'), &s), Some(Action::OpenComposer)));
        assert!(matches!(h.map_input(press('2'), &s), Some(Action::SetView(View::Charcha))));
    }

    #[test]
    fn test_vote_without_poll_does_nothing() {
        let h = handler();
        let s = StoreSnapshot {
            highlighted_option_id: None,
            ..feed_snapshot()
        };
        assert!(h.map_input(press('v'), &s).is_none());
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let h = handler();
        let s = StoreSnapshot {
            show_help: true,
            ..feed_snapshot()
        };
        assert!(h.map_input(press('q'), &s).is_none());
        assert!(matches!(h.map_input(InputEvent::plain(Key::Escape), &s), Some(Action::ToggleHelp)));
    }

    #[test]
    fn test_tab_cycles_views() {
        let h = handler();
        let s = StoreSnapshot {
            current_view: View::Profile,
            ..Default::default()
        };
        assert!(matches!(h.map_input(InputEvent::plain(Key::Tab), &s), Some(Action::SetView(View::Feed))));
        assert!(matches!(
            h.map_input(InputEvent::plain(Key::BackTab), &s),
            Some(Action::SetView(View::Leaderboard))
        ));
    }

    #[test]
    fn test_compose_keys() {
        let h = handler();
        let s = StoreSnapshot {
            input_mode: InputMode::Compose,
            ..Default::default()
        };
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };

        assert!(matches!(h.map_input(press('q'), &s), Some(Action::InsertChar('q'))));
        assert!(matches!(h.map_input(with(Key::Char('s'), ctrl), &s), Some(Action::SubmitPost)));
        assert!(matches!(h.map_input(with(Key::Char('p'), ctrl), &s), Some(Action::TogglePollMode)));
        assert!(matches!(
            h.map_input(InputEvent::plain(Key::Enter), &s),
            Some(Action::MentionKey(Key::Enter))
        ));
        assert!(matches!(h.map_input(InputEvent::plain(Key::Tab), &s), Some(Action::NextField)));
    }

    #[test]
    fn test_compose_poll_field_keys() {
        let h = handler();
        let s = StoreSnapshot {
            input_mode: InputMode::Compose,
            composer_field: ComposerField::Question,
            ..Default::default()
        };
        assert!(matches!(h.map_input(InputEvent::plain(Key::Enter), &s), Some(Action::NextField)));
        assert!(matches!(h.map_input(InputEvent::plain(Key::Escape), &s), Some(Action::CloseComposer)));
    }

    #[test]
    fn test_alt_digit_picks_mention() {
        let h = handler();
        let alt = Modifiers {
            alt: true,
            ..Default::default()
        };
        let open = StoreSnapshot {
            input_mode: InputMode::Compose,
            mention_open: true,
            ..Default::default()
        };
        assert!(matches!(h.map_input(with(Key::Char('3'), alt), &open), Some(Action::SelectMention(2))));

        let closed = StoreSnapshot {
            mention_open: false,
            ..open
        };
        assert!(h.map_input(with(Key::Char('3'), alt), &closed).is_none());
    }

    #[test]
    fn test_line_modes() {
        let h = handler();
        let chat = StoreSnapshot {
            input_mode: InputMode::Chat,
            ..Default::default()
        };
        assert!(matches!(h.map_input(press('q'), &chat), Some(Action::InsertChar('q'))));
        assert!(matches!(h.map_input(InputEvent::plain(Key::Enter), &chat), Some(Action::SendChatMessage)));
        assert!(matches!(
            h.map_input(InputEvent::plain(Key::Escape), &chat),
            Some(Action::SetInputMode(InputMode::Normal))
        ));

        let profile = StoreSnapshot {
            input_mode: InputMode::ProfileEdit,
            ..Default::default()
        };
        assert!(matches!(h.map_input(InputEvent::plain(Key::Enter), &profile), Some(Action::SaveProfile)));
        assert!(matches!(h.map_input(InputEvent::plain(Key::Down), &profile), Some(Action::NextField)));
        assert!(matches!(
            h.map_input(InputEvent::plain(Key::Escape), &profile),
            Some(Action::CancelProfileEdit)
        ));
    }

    #[test]
    fn test_leaderboard_opens_profile() {
        let h = handler();
        let s = StoreSnapshot {
            current_view: View::Leaderboard,
            leaderboard_user_id: Some("5".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            h.map_input(InputEvent::plain(Key::Enter), &s),
            Some(Action::ShowProfile(id)) if id == "5"
        ));
    }
}
