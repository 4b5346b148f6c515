//! State management for InvestMate.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Side effects are
//! requested by dispatching `Request*` actions, which the app performs and
//! answers with completion actions.

mod app_state;
mod chart_state;
mod chat_state;
mod club_state;
pub mod directory;
mod feed_state;
mod profile_state;
pub mod seed;
mod text_input;

pub use app_state::{AppState, InputMode, View};
pub use chart_state::{ChartKind, ChartState};
pub use chat_state::{ChatMessage, ChatState, SIMULATED_REPLY};
pub use club_state::{CATEGORY_FILTERS, Club, ClubCategory, ClubState};
pub use directory::{Directory, Reputation, User};
pub use feed_state::{
    AnalysisStatus, Comment, ComposeError, Composer, ComposerField, FeedState, Post, PostKind,
    create_post, relative_time,
};
pub use profile_state::{ProfileField, ProfileForm, ProfileState};
pub use seed::{DailyXp, SeedData};
pub use text_input::TextInput;

use crate::api::Analysis;
use crate::config::{ChartConfig, Config};
use crate::content::{KeyOutcome, VoteOutcome, primary_ticker};
use crate::error::Result;
use crate::events::Key;
use crate::market::{LiveFeed, NewsItem, Quote};
use chrono::Utc;
use rand::seq::IndexedRandom;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    ShowProfile(String),
    SetInputMode(InputMode),
    SelectNext,
    SelectPrev,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    Tick,
    SetOnline(bool),

    // Text editing, routed to the focused field
    InsertChar(char),
    Paste(String),
    Backspace,
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    NextField,
    PrevField,

    // Composer
    OpenComposer,
    CloseComposer,
    MentionKey(Key),
    SelectMention(usize),
    SetComposerCursor(usize),
    InsertHashtag,
    TogglePollMode,
    AddPollOption,
    RemovePollOption,
    SubmitPost,

    // Feed
    ToggleLike(String),
    ToggleComments(String),
    StartComment,
    SubmitComment,
    AnalyzePost(String),
    AnalysisLoaded { post_id: String, analysis: Analysis },
    CyclePollOption,
    Vote { post_id: String, option_id: String },

    // Chart
    ChartRangeNext,
    ChartRangePrev,
    CycleChartKind,
    QuoteLoaded {
        symbol: String,
        quote: Option<Quote>,
        news: Vec<NewsItem>,
    },
    LiveTick(String),

    // Charcha
    SendChatMessage,
    ChatReply,
    SummarizeChat,
    SummaryLoaded(String),

    // Clubs
    CycleClubCategory,
    ToggleJoinClub(String),

    // Profile
    StartProfileEdit,
    SaveProfile,
    CancelProfileEdit,

    // Requests performed by the app
    RequestAnalysis { post_id: String, content: String },
    RequestQuote(String),
    RequestSummary(Vec<String>),
    ScheduleChatReply,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub shown_at: Instant,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            shown_at: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= Duration::from_secs(self.duration_secs)
    }
}

/// Edit applied to the focused text field.
#[derive(Debug, Clone)]
enum TextEdit {
    Insert(char),
    InsertStr(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

impl TextEdit {
    fn apply(self, input: &mut TextInput, multiline: bool) {
        match self {
            Self::Insert('\n') if !multiline => {}
            Self::Insert(c) => input.insert(c),
            Self::InsertStr(s) if !multiline => input.insert_str(&s.replace(['\r', '\n'], " ")),
            Self::InsertStr(s) => input.insert_str(&s),
            Self::Backspace => input.backspace(),
            Self::Delete => input.delete(),
            Self::Left => input.left(),
            Self::Right => input.right(),
            Self::Home => input.home(),
            Self::End => input.end(),
        }
    }

    /// Poll fields only append and delete at the end.
    fn apply_to_line(self, text: &mut String) {
        match self {
            Self::Insert(c) if c != '\n' => text.push(c),
            Self::InsertStr(s) => text.push_str(&s.replace(['\r', '\n'], " ")),
            Self::Backspace => {
                text.pop();
            }
            _ => {}
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// All users.
    pub directory: Directory,
    /// ID of the signed-in user.
    pub current_user_id: String,
    /// Feed and composer.
    pub feed: FeedState,
    /// Chart of the selected post's ticker.
    pub chart: Option<ChartState>,
    /// Chat room.
    pub chat: ChatState,
    /// Club directory.
    pub clubs: ClubState,
    /// Profile view.
    pub profile: ProfileState,
    /// XP earned per weekday.
    pub weekly_activity: Vec<DailyXp>,
    /// Chart settings.
    chart_config: ChartConfig,
    /// Period of live chart ticks.
    live_tick: Duration,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a store seeded with `seed`.
    pub fn new(seed: SeedData, config: &Config, action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            directory: Directory::new(seed.users),
            current_user_id: seed.current_user_id,
            feed: FeedState::new(seed.posts),
            chart: None,
            chat: ChatState::new(seed.messages, seed.chat_members),
            clubs: ClubState::new(seed.clubs),
            profile: ProfileState::default(),
            weekly_activity: seed.weekly_activity,
            chart_config: config.chart.clone(),
            live_tick: Duration::from_millis(config.ui.live_tick_ms.max(1)),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// The signed-in user.
    pub fn current_user(&self) -> Option<&User> {
        self.directory.get(&self.current_user_id)
    }

    /// The user shown on the profile view.
    pub fn profile_user(&self) -> Option<&User> {
        let id = self.profile.viewing.as_deref().unwrap_or(&self.current_user_id);
        self.directory.get(id)
    }

    /// Whether the profile view shows the signed-in user.
    pub fn viewing_own_profile(&self) -> bool {
        self.profile
            .viewing
            .as_deref()
            .is_none_or(|id| id == self.current_user_id)
    }

    /// Display name for a user ID.
    pub fn user_name(&self, id: &str) -> &str {
        self.directory.get(id).map(|u| u.name.as_str()).unwrap_or("Unknown")
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => self.set_view(view),
            Action::ShowProfile(user_id) => {
                self.set_view(View::Profile);
                self.profile.viewing = Some(user_id);
            }
            Action::SetInputMode(mode) => self.app.input_mode = mode,
            Action::SelectNext => self.scroll(1),
            Action::SelectPrev => self.scroll(-1),
            Action::GoToTop => self.scroll(isize::MIN / 2),
            Action::GoToBottom => self.scroll(isize::MAX / 2),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }
            Action::Tick => {
                if self
                    .app
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.is_expired(Instant::now()))
                {
                    self.app.notification = None;
                }
            }
            Action::SetOnline(online) => self.app.online = online,

            // Text editing
            Action::InsertChar(c) => self.edit_text(TextEdit::Insert(c)),
            Action::Paste(s) => self.edit_text(TextEdit::InsertStr(s)),
            Action::Backspace => self.edit_text(TextEdit::Backspace),
            Action::DeleteChar => self.edit_text(TextEdit::Delete),
            Action::CursorLeft => self.edit_text(TextEdit::Left),
            Action::CursorRight => self.edit_text(TextEdit::Right),
            Action::CursorHome => self.edit_text(TextEdit::Home),
            Action::CursorEnd => self.edit_text(TextEdit::End),
            Action::NextField => self.step_field(true),
            Action::PrevField => self.step_field(false),

            // Composer
            Action::OpenComposer => {
                if self.app.current_view != View::Feed {
                    self.set_view(View::Feed);
                }
                self.feed.composing = true;
                self.app.input_mode = InputMode::Compose;
            }
            Action::CloseComposer => self.close_composer(),
            Action::MentionKey(key) => self.mention_key(key),
            Action::SelectMention(index) => {
                let composer = &mut self.feed.composer;
                if let Some(edit) = composer
                    .mention
                    .select(index, composer.body.value(), &self.directory)
                {
                    composer.body.set_value(edit.text);
                    self.emit(Action::SetComposerCursor(edit.cursor));
                }
            }
            Action::SetComposerCursor(cursor) => self.feed.composer.body.set_cursor(cursor),
            Action::InsertHashtag => {
                self.feed.composer.field = ComposerField::Body;
                self.feed.composer.insert_hashtag();
            }
            Action::TogglePollMode => self.feed.composer.toggle_poll_mode(),
            Action::AddPollOption => {
                let composer = &mut self.feed.composer;
                if !composer.poll_mode {
                    return;
                }
                if composer.poll.add_option() {
                    composer.field = ComposerField::Option(composer.poll.options().len() - 1);
                } else {
                    self.notify(Notification::warning(format!(
                        "A poll can have at most {} options",
                        crate::content::poll::MAX_OPTIONS
                    )));
                }
            }
            Action::RemovePollOption => {
                if !self.feed.composer.remove_focused_option() {
                    self.notify(Notification::warning(format!(
                        "A poll needs at least {} options",
                        crate::content::poll::MIN_OPTIONS
                    )));
                }
            }
            Action::SubmitPost => self.submit_post(),

            // Feed
            Action::ToggleLike(post_id) => {
                if let Some(post) = self.feed.post_mut(&post_id) {
                    post.toggle_like();
                }
            }
            Action::ToggleComments(post_id) => {
                if !self.feed.expanded.remove(&post_id) {
                    self.feed.expanded.insert(post_id);
                }
            }
            Action::StartComment => {
                if let Some(id) = self.feed.selected_post().map(|p| p.id.clone()) {
                    self.feed.expanded.insert(id);
                    self.app.input_mode = InputMode::Comment;
                }
            }
            Action::SubmitComment => self.submit_comment(),
            Action::AnalyzePost(post_id) => self.analyze_post(post_id),
            Action::AnalysisLoaded { post_id, analysis } => {
                tracing::debug!(post_id = %post_id, sentiment = %analysis.sentiment, "Analysis loaded");
                self.feed
                    .analyses
                    .insert(post_id, AnalysisStatus::Ready(analysis));
            }
            Action::CyclePollOption => {
                let count = self
                    .feed
                    .selected_post()
                    .and_then(|p| p.poll.as_ref())
                    .map(|poll| poll.options().len())
                    .unwrap_or(0);
                if count > 0 {
                    self.feed.poll_cursor = (self.feed.poll_cursor + 1) % count;
                }
            }
            Action::Vote { post_id, option_id } => self.vote(&post_id, &option_id),

            // Chart
            Action::ChartRangeNext => self.change_range(true),
            Action::ChartRangePrev => self.change_range(false),
            Action::CycleChartKind => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.kind = chart.kind.next();
                }
            }
            Action::QuoteLoaded {
                symbol,
                quote,
                news,
            } => self.quote_loaded(&symbol, quote, news),
            Action::LiveTick(symbol) => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.tick(&symbol, &mut rand::rng());
                }
            }

            // Charcha
            Action::SendChatMessage => self.send_chat_message(),
            Action::ChatReply => {
                let Some(member) = self.chat.members.choose(&mut rand::rng()).cloned() else {
                    return;
                };
                self.chat.push(&member, SIMULATED_REPLY, Utc::now());
            }
            Action::SummarizeChat => {
                if self.chat.summarizing {
                    return;
                }
                let lines: Vec<String> = self
                    .chat
                    .messages
                    .iter()
                    .map(|m| format!("{}: {}", self.user_name(&m.author_id), m.content))
                    .collect();
                self.chat.summarizing = true;
                self.emit(Action::RequestSummary(lines));
            }
            Action::SummaryLoaded(summary) => {
                self.chat.summary = Some(summary);
                self.chat.summarizing = false;
            }

            // Clubs
            Action::CycleClubCategory => self.clubs.cycle_category(),
            Action::ToggleJoinClub(club_id) => {
                let joined = self.clubs.toggle_join(&club_id);
                let name = self
                    .clubs
                    .clubs
                    .iter()
                    .find(|c| c.id == club_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                let message = if joined {
                    format!("Joined {name}")
                } else {
                    format!("Left {name}")
                };
                self.notify(Notification::success(message));
            }

            // Profile
            Action::StartProfileEdit => {
                if !self.viewing_own_profile() {
                    return;
                }
                if let Some(user) = self.current_user() {
                    self.profile.form = Some(ProfileForm::from_user(user));
                    self.app.input_mode = InputMode::ProfileEdit;
                }
            }
            Action::SaveProfile => self.save_profile(),
            Action::CancelProfileEdit => {
                self.profile.form = None;
                self.app.input_mode = InputMode::Normal;
            }

            // Performed by the app
            Action::RequestAnalysis { .. }
            | Action::RequestQuote(_)
            | Action::RequestSummary(_)
            | Action::ScheduleChatReply => {}

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    /// Send a follow-up action.
    fn emit(&self, action: Action) {
        if let Err(e) = self.dispatch(action) {
            tracing::warn!(error = %e, "Failed to dispatch follow-up action");
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.app.notification = Some(notification);
    }

    fn set_view(&mut self, view: View) {
        if view != View::Feed {
            self.chart = None;
            self.feed.composing = false;
        }
        self.app.current_view = view;
        self.app.input_mode = InputMode::Normal;

        match view {
            View::Feed => self.sync_chart(),
            View::Profile => {
                self.profile.viewing = None;
                self.profile.form = None;
            }
            _ => {}
        }
    }

    fn scroll(&mut self, delta: isize) {
        fn step(current: usize, delta: isize, len: usize) -> usize {
            let max = len.saturating_sub(1) as isize;
            (current as isize).saturating_add(delta).clamp(0, max.max(0)) as usize
        }

        match self.app.current_view {
            View::Feed => {
                let index = step(self.feed.selected, delta, self.feed.posts.len());
                self.feed.select(index);
                self.sync_chart();
            }
            View::Charcha => {
                // scrolling up moves away from the newest message
                self.chat.scroll = step(self.chat.scroll, -delta, self.chat.messages.len());
            }
            View::Clubs => {
                self.clubs.selected = step(self.clubs.selected, delta, self.clubs.filtered().len());
            }
            View::Leaderboard => {
                self.app.leaderboard_selected =
                    step(self.app.leaderboard_selected, delta, self.directory.len());
            }
            View::Profile => {}
        }
    }

    fn edit_text(&mut self, edit: TextEdit) {
        match self.app.input_mode {
            InputMode::Normal => {}
            InputMode::Compose => {
                let composer = &mut self.feed.composer;
                match composer.field {
                    ComposerField::Body => {
                        edit.apply(&mut composer.body, true);
                        composer.body_changed();
                    }
                    field => {
                        if let Some(text) = composer.poll_field_mut(field) {
                            edit.apply_to_line(text);
                        }
                    }
                }
            }
            InputMode::Comment => edit.apply(&mut self.feed.comment_input, false),
            InputMode::Chat => edit.apply(&mut self.chat.input, false),
            InputMode::ClubSearch => {
                edit.apply(&mut self.clubs.search, false);
                self.clubs.clamp_selection();
            }
            InputMode::ProfileEdit => {
                if let Some(form) = self.profile.form.as_mut() {
                    edit.apply(form.focused_mut(), false);
                }
            }
        }
    }

    fn step_field(&mut self, forward: bool) {
        match self.app.input_mode {
            InputMode::Compose if forward => self.feed.composer.focus_next(),
            InputMode::Compose => self.feed.composer.focus_prev(),
            InputMode::ProfileEdit => {
                if let Some(form) = self.profile.form.as_mut() {
                    form.field = if forward {
                        form.field.next()
                    } else {
                        form.field.prev()
                    };
                }
            }
            _ => {}
        }
    }

    fn close_composer(&mut self) {
        self.feed.composing = false;
        self.feed.composer.mention.reset();
        self.app.input_mode = InputMode::Normal;
    }

    fn mention_key(&mut self, key: Key) {
        let composer = &mut self.feed.composer;
        let outcome = composer
            .mention
            .on_key(key, composer.body.value(), &self.directory);

        match outcome {
            KeyOutcome::Committed(edit) => {
                tracing::debug!(cursor = edit.cursor, "Mention inserted");
                composer.body.set_value(edit.text);
                self.emit(Action::SetComposerCursor(edit.cursor));
            }
            KeyOutcome::Moved | KeyOutcome::Dismissed => {}
            KeyOutcome::Ignored => match key {
                Key::Enter => self.edit_text(TextEdit::Insert('\n')),
                Key::Escape => self.close_composer(),
                _ => {}
            },
        }
    }

    fn submit_post(&mut self) {
        match create_post(&self.feed.composer, &self.current_user_id, Utc::now()) {
            Ok(post) => {
                tracing::info!(post_id = %post.id, tags = ?post.tags, "Post published");
                self.feed.posts.insert(0, post);
                self.feed.composer.reset();
                self.close_composer();
                self.feed.select(0);
                self.sync_chart();
                self.notify(Notification::success("Post published"));
            }
            Err(e) => self.notify(Notification::warning(capitalize(&e.to_string()))),
        }
    }

    fn submit_comment(&mut self) {
        if self.feed.comment_input.is_blank() {
            self.notify(Notification::warning("Comment cannot be empty"));
            return;
        }
        let Some(post_id) = self.feed.selected_post().map(|p| p.id.clone()) else {
            return;
        };
        let content = self.feed.comment_input.take();
        let author = self.current_user_id.clone();
        if let Some(post) = self.feed.post_mut(&post_id) {
            post.add_comment(&author, &content, Utc::now());
        }
        self.app.input_mode = InputMode::Normal;
    }

    fn analyze_post(&mut self, post_id: String) {
        if self.feed.analyses.contains_key(&post_id) {
            return;
        }
        let Some(content) = self.feed.post(&post_id).map(|p| p.content.clone()) else {
            return;
        };
        self.feed
            .analyses
            .insert(post_id.clone(), AnalysisStatus::Pending);
        self.emit(Action::RequestAnalysis { post_id, content });
    }

    fn vote(&mut self, post_id: &str, option_id: &str) {
        let Some(poll) = self.feed.post_mut(post_id).and_then(|p| p.poll.as_mut()) else {
            return;
        };
        match poll.vote(option_id) {
            VoteOutcome::Recorded => {
                tracing::debug!(post_id, option_id, "Vote recorded");
                self.notify(Notification::success("Vote recorded"));
            }
            outcome => tracing::debug!(post_id, ?outcome, "Vote ignored"),
        }
    }

    /// Point the chart at the selected post's first ticker.
    fn sync_chart(&mut self) {
        if self.app.current_view != View::Feed {
            self.chart = None;
            return;
        }

        let symbol = self
            .feed
            .selected_post()
            .and_then(|p| primary_ticker(&p.content))
            .map(str::to_string);

        match symbol {
            None => self.chart = None,
            Some(symbol) if self.chart.as_ref().is_some_and(|c| c.symbol == symbol) => {}
            Some(symbol) => {
                let kind = self.chart.as_ref().map(|c| c.kind).unwrap_or_default();
                tracing::debug!(symbol = %symbol, "Opening chart");
                self.chart = Some(ChartState::loading(
                    symbol.clone(),
                    self.chart_config.default_range,
                    kind,
                ));
                self.emit(Action::RequestQuote(symbol));
            }
        }
    }

    fn quote_loaded(&mut self, symbol: &str, quote: Option<Quote>, news: Vec<NewsItem>) {
        let Some(chart) = self.chart.as_mut().filter(|c| c.symbol == symbol) else {
            tracing::debug!(symbol, "Ignoring quote for a chart no longer shown");
            return;
        };
        chart.load(quote, news, &self.chart_config, &mut rand::rng());
        self.sync_live_feed();
    }

    fn change_range(&mut self, forward: bool) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        let range = if forward {
            chart.range.next()
        } else {
            chart.range.prev()
        };
        chart.set_range(range);
        self.sync_live_feed();
    }

    /// Start or stop live ticks to match the chart's range.
    fn sync_live_feed(&mut self) {
        let Some(chart) = self.chart.as_mut() else {
            return;
        };
        if !chart.wants_live() {
            chart.stop_live();
        } else if !chart.is_live() {
            let feed = LiveFeed::spawn(chart.symbol.clone(), self.live_tick, self.action_tx.clone());
            chart.start_live(feed);
        }
    }

    fn send_chat_message(&mut self) {
        if self.chat.input.is_blank() {
            self.notify(Notification::warning("Message cannot be empty"));
            return;
        }
        let content = self.chat.input.take();
        let author = self.current_user_id.clone();
        self.chat.push(&author, &content, Utc::now());
        self.emit(Action::ScheduleChatReply);
    }

    fn save_profile(&mut self) {
        let Some(form) = self.profile.form.take() else {
            return;
        };
        let Some(user) = self.directory.get_mut(&self.current_user_id) else {
            return;
        };
        match form.apply(user) {
            Ok(()) => {
                tracing::info!(user_id = %self.current_user_id, "Profile updated");
                self.app.input_mode = InputMode::Normal;
                self.notify(Notification::success("Profile updated"));
            }
            Err(reason) => {
                self.profile.form = Some(form);
                self.notify(Notification::warning(capitalize(reason)));
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> (Store, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = Store::new(SeedData::demo(Utc::now()), &Config::default(), tx);
        (store, rx)
    }

    fn type_text(store: &mut Store, text: &str) {
        for c in text.chars() {
            store.reduce(Action::InsertChar(c));
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Action>) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    #[test]
    fn test_second_vote_changes_nothing() {
        let (mut store, _rx) = store();
        let vote = |option: &str| Action::Vote {
            post_id: "103".to_string(),
            option_id: option.to_string(),
        };

        store.reduce(vote("opt2"));
        let after_first = store.feed.post("103").unwrap().poll.clone().unwrap();
        assert_eq!(after_first.total_votes(), 231);
        assert_eq!(after_first.viewer_vote(), Some("opt2"));

        store.reduce(vote("opt1"));
        assert_eq!(store.feed.post("103").unwrap().poll.as_ref(), Some(&after_first));
    }

    #[test]
    fn test_like_toggles() {
        let (mut store, _rx) = store();
        store.reduce(Action::ToggleLike("101".to_string()));
        assert_eq!(store.feed.post("101").unwrap().likes, 46);
        store.reduce(Action::ToggleLike("101".to_string()));
        assert_eq!(store.feed.post("101").unwrap().likes, 45);
    }

    #[test]
    fn test_empty_post_is_refused() {
        let (mut store, _rx) = store();
        store.reduce(Action::OpenComposer);
        type_text(&mut store, "   ");
        store.reduce(Action::SubmitPost);

        assert_eq!(store.feed.posts.len(), 3);
        let notification = store.app.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotificationLevel::Warning);
        assert_eq!(store.app.input_mode, InputMode::Compose);
    }

    #[test]
    fn test_submit_post_goes_to_top() {
        let (mut store, _rx) = store();
        store.reduce(Action::OpenComposer);
        type_text(&mut store, "Banks look strong #BankNifty");
        store.reduce(Action::SubmitPost);

        let post = &store.feed.posts[0];
        assert_eq!(post.author_id, "1");
        assert_eq!(post.tags, vec!["BankNifty"]);
        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.feed.composer.body.is_empty());
        assert_eq!(store.feed.selected, 0);
    }

    #[test]
    fn test_poll_post_through_composer() {
        let (mut store, _rx) = store();
        store.reduce(Action::OpenComposer);
        store.reduce(Action::TogglePollMode);
        store.reduce(Action::NextField);
        type_text(&mut store, "Fed cut?");
        store.reduce(Action::NextField);
        type_text(&mut store, "Yes");
        store.reduce(Action::SubmitPost);
        assert_eq!(store.feed.posts.len(), 3);

        store.reduce(Action::NextField);
        type_text(&mut store, "No");
        store.reduce(Action::SubmitPost);

        let post = &store.feed.posts[0];
        assert_eq!(post.tags, vec!["Poll"]);
        assert_eq!(post.poll.as_ref().unwrap().question(), "Fed cut?");
    }

    #[test]
    fn test_poll_mode_needs_question() {
        let (mut store, _rx) = store();
        store.reduce(Action::OpenComposer);
        type_text(&mut store, "Nifty view");
        store.reduce(Action::TogglePollMode);
        store.reduce(Action::SubmitPost);

        assert_eq!(store.feed.posts.len(), 3);
        assert!(store.feed.composing);
        assert_eq!(store.feed.composer.body.value(), "Nifty view");
        assert!(matches!(
            store.app.notification.as_ref().map(|n| n.level),
            Some(NotificationLevel::Warning)
        ));
    }

    #[test]
    fn test_poll_option_bounds_warn() {
        let (mut store, _rx) = store();
        store.reduce(Action::OpenComposer);
        store.reduce(Action::TogglePollMode);
        store.reduce(Action::AddPollOption);
        store.reduce(Action::AddPollOption);
        assert!(store.app.notification.is_none());

        store.reduce(Action::AddPollOption);
        assert!(store.app.notification.is_some());
        assert_eq!(store.feed.composer.poll.options().len(), 4);
    }

    #[test]
    fn test_mention_commit_defers_cursor() {
        let (mut store, mut rx) = store();
        store.reduce(Action::OpenComposer);
        type_text(&mut store, "hi @ra there");
        for _ in 0..6 {
            store.reduce(Action::CursorLeft);
        }
        assert_eq!(store.feed.composer.mention.query(), Some("ra"));

        store.reduce(Action::MentionKey(Key::Enter));
        assert_eq!(store.feed.composer.body.value(), "hi @rahul_t  there");
        assert!(!store.feed.composer.mention.is_suggesting());

        let follow_up = drain(&mut rx);
        assert!(matches!(follow_up.as_slice(), [Action::SetComposerCursor(12)]));
        store.reduce(Action::SetComposerCursor(12));
        assert_eq!(store.feed.composer.body.cursor(), 12);
    }

    #[test]
    fn test_select_mention_by_index() {
        let (mut store, mut rx) = store();
        store.reduce(Action::OpenComposer);
        type_text(&mut store, "@");
        store.reduce(Action::SelectMention(2));
        assert_eq!(store.feed.composer.body.value(), "@priya_i ");
        assert!(matches!(drain(&mut rx).as_slice(), [Action::SetComposerCursor(9)]));
    }

    #[test]
    fn test_escape_without_suggestions_closes_composer() {
        let (mut store, _rx) = store();
        store.reduce(Action::OpenComposer);
        type_text(&mut store, "draft");
        store.reduce(Action::MentionKey(Key::Escape));
        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(!store.feed.composing);
        assert_eq!(store.feed.composer.body.value(), "draft");
    }

    #[test]
    fn test_analysis_requested_once() {
        let (mut store, mut rx) = store();
        store.reduce(Action::AnalyzePost("102".to_string()));
        store.reduce(Action::AnalyzePost("102".to_string()));

        let requests = drain(&mut rx);
        assert_eq!(requests.len(), 1);
        assert!(matches!(&requests[0], Action::RequestAnalysis { post_id, .. } if post_id == "102"));
        assert_eq!(store.feed.analysis("102"), Some(&AnalysisStatus::Pending));

        store.reduce(Action::AnalysisLoaded {
            post_id: "102".to_string(),
            analysis: Analysis::unavailable(),
        });
        assert_eq!(
            store.feed.analysis("102"),
            Some(&AnalysisStatus::Ready(Analysis::unavailable()))
        );
    }

    #[test]
    fn test_comment_requires_text() {
        let (mut store, _rx) = store();
        store.reduce(Action::StartComment);
        store.reduce(Action::SubmitComment);
        assert_eq!(store.feed.posts[0].comments.len(), 2);

        type_text(&mut store, "Nice call");
        store.reduce(Action::SubmitComment);
        let post = &store.feed.posts[0];
        assert_eq!(post.comments.len(), 3);
        assert_eq!(post.comments[2].content, "Nice call");
        assert_eq!(post.comment_count, 13);
        assert_eq!(store.app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_feed_opens_chart_for_primary_ticker() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetView(View::Feed));

        let chart = store.chart.as_ref().unwrap();
        assert_eq!(chart.symbol, "$INFY");
        assert!(chart.is_loading());
        assert!(matches!(drain(&mut rx).as_slice(), [Action::RequestQuote(s)] if s == "$INFY"));

        // the poll post has no ticker
        store.reduce(Action::GoToBottom);
        assert!(store.chart.is_none());
    }

    #[test]
    fn test_stale_quote_is_ignored() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::Feed));
        store.reduce(Action::QuoteLoaded {
            symbol: "$TCS".to_string(),
            quote: None,
            news: Vec::new(),
        });
        assert!(store.chart.as_ref().unwrap().is_loading());
    }

    #[tokio::test]
    async fn test_live_feed_follows_range() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::Feed));
        store.reduce(Action::QuoteLoaded {
            symbol: "$INFY".to_string(),
            quote: Some(Quote {
                price: 1450.2,
                change_percent: 1.5,
                currency: "INR".to_string(),
            }),
            news: Vec::new(),
        });

        let chart = store.chart.as_ref().unwrap();
        assert_eq!(chart.series.as_ref().unwrap().last().unwrap().close, 1450.2);
        assert!(chart.is_live());

        store.reduce(Action::ChartRangeNext);
        assert!(!store.chart.as_ref().unwrap().is_live());

        store.reduce(Action::ChartRangePrev);
        assert!(store.chart.as_ref().unwrap().is_live());

        store.reduce(Action::SetView(View::Clubs));
        assert!(store.chart.is_none());
    }

    #[test]
    fn test_chat_send_schedules_reply() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SetView(View::Charcha));
        store.reduce(Action::SetInputMode(InputMode::Chat));

        store.reduce(Action::SendChatMessage);
        assert_eq!(store.chat.messages.len(), 3);

        type_text(&mut store, "Nifty looks weak");
        store.reduce(Action::SendChatMessage);
        assert_eq!(store.chat.messages.len(), 4);
        assert_eq!(store.chat.messages[3].author_id, "1");
        assert!(matches!(drain(&mut rx).as_slice(), [Action::ScheduleChatReply]));

        store.reduce(Action::ChatReply);
        let reply = store.chat.messages.last().unwrap();
        assert_eq!(reply.content, SIMULATED_REPLY);
        assert!(store.chat.members.contains(&reply.author_id));
    }

    #[test]
    fn test_summary_lines_use_display_names() {
        let (mut store, mut rx) = store();
        store.reduce(Action::SummarizeChat);
        store.reduce(Action::SummarizeChat);

        let requests = drain(&mut rx);
        assert_eq!(requests.len(), 1);
        let Action::RequestSummary(lines) = &requests[0] else {
            panic!("expected a summary request, got {requests:?}");
        };
        assert_eq!(
            lines[0],
            "Rahul Trader: Bank Nifty facing resistance at 44500 levels. Watch out."
        );

        store.reduce(Action::SummaryLoaded("- Resistance at 44500".to_string()));
        assert!(!store.chat.summarizing);
        assert_eq!(store.chat.summary.as_deref(), Some("- Resistance at 44500"));
    }

    #[test]
    fn test_profile_edit_only_for_own_profile() {
        let (mut store, _rx) = store();
        store.reduce(Action::ShowProfile("2".to_string()));
        store.reduce(Action::StartProfileEdit);
        assert!(store.profile.form.is_none());

        store.reduce(Action::SetView(View::Profile));
        store.reduce(Action::StartProfileEdit);
        assert_eq!(store.app.input_mode, InputMode::ProfileEdit);

        store.reduce(Action::NextField);
        store.reduce(Action::CursorEnd);
        type_text(&mut store, " Options too.");
        store.reduce(Action::SaveProfile);

        assert!(store.profile.form.is_none());
        assert!(store.current_user().unwrap().bio.ends_with("NISM Certified. Options too."));
    }

    #[test]
    fn test_club_search_filters_while_typing() {
        let (mut store, _rx) = store();
        store.reduce(Action::SetView(View::Clubs));
        store.reduce(Action::SetInputMode(InputMode::ClubSearch));
        type_text(&mut store, "crypto");

        let names: Vec<&str> = store.clubs.filtered().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Crypto Corner"]);
    }

    #[test]
    fn test_notification_expires_on_tick() {
        let (mut store, _rx) = store();
        let mut old = Notification::info("hello");
        old.shown_at = Instant::now() - Duration::from_secs(10);
        store.reduce(Action::ShowNotification(old));
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_none());

        store.reduce(Action::ShowNotification(Notification::info("fresh")));
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_some());
    }
}
