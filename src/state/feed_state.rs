//! Feed state: posts, comments and the composer.

use super::text_input::TextInput;
use crate::api::{Analysis, Sentiment};
use crate::content::{MentionAutocomplete, Poll, PollDraft, PollError, extract_hashtags};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use uuid::Uuid;

/// Kind of post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostKind {
    #[default]
    View,
    Idea,
    Strategy,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A feed post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: u32,
    /// Whether the viewer has liked the post.
    pub liked: bool,
    pub tags: Vec<String>,
    pub kind: PostKind,
    pub sentiment: Option<Sentiment>,
    pub poll: Option<Poll>,
    /// Total comments, including ones not loaded.
    pub comment_count: u32,
    /// Loaded comments, oldest first.
    pub comments: Vec<Comment>,
}

impl Post {
    /// Like or unlike. Returns the new like state.
    pub fn toggle_like(&mut self) -> bool {
        if self.liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes += 1;
        }
        self.liked = !self.liked;
        self.liked
    }

    pub fn add_comment(&mut self, author_id: &str, content: &str, now: DateTime<Utc>) {
        self.comments.push(Comment {
            id: Uuid::new_v4().to_string(),
            author_id: author_id.to_string(),
            content: content.to_string(),
            created_at: now,
        });
        self.comment_count += 1;
    }
}

/// AI analysis of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    Pending,
    Ready(Analysis),
}

/// Why a post could not be published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("write something or add a poll question")]
    Empty,
    #[error(transparent)]
    Poll(#[from] PollError),
}

/// Field of the composer that receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerField {
    #[default]
    Body,
    Question,
    Option(usize),
}

/// Post composer.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub body: TextInput,
    pub mention: MentionAutocomplete,
    pub poll_mode: bool,
    pub poll: PollDraft,
    pub field: ComposerField,
}

impl Composer {
    /// Toggle poll mode. Leaving it discards the draft.
    pub fn toggle_poll_mode(&mut self) {
        if self.poll_mode {
            self.poll_mode = false;
            self.poll = PollDraft::new();
            self.field = ComposerField::Body;
        } else {
            self.poll_mode = true;
        }
    }

    /// Append `" #"` to the body and put the cursor at the end.
    pub fn insert_hashtag(&mut self) {
        self.body.end();
        self.body.insert_str(" #");
        self.mention.reset();
    }

    /// Re-run mention detection after a body edit.
    pub fn body_changed(&mut self) {
        self.mention
            .on_text_change(self.body.value(), self.body.cursor());
    }

    /// Fields in focus order.
    pub fn fields(&self) -> Vec<ComposerField> {
        let mut fields = vec![ComposerField::Body];
        if self.poll_mode {
            fields.push(ComposerField::Question);
            fields.extend((0..self.poll.options().len()).map(ComposerField::Option));
        }
        fields
    }

    pub fn focus_next(&mut self) {
        self.focus_step(1);
    }

    pub fn focus_prev(&mut self) {
        self.focus_step(-1);
    }

    fn focus_step(&mut self, delta: isize) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.field).unwrap_or(0) as isize;
        let len = fields.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.field = fields[next];
        self.mention.reset();
    }

    /// Text of a poll field, if it exists.
    pub fn poll_field_mut(&mut self, field: ComposerField) -> Option<&mut String> {
        match field {
            ComposerField::Body => None,
            ComposerField::Question => Some(&mut self.poll.question),
            ComposerField::Option(i) => self.poll.option_mut(i),
        }
    }

    /// Remove the focused option, moving focus to a valid field.
    pub fn remove_focused_option(&mut self) -> bool {
        let ComposerField::Option(i) = self.field else {
            return false;
        };
        if !self.poll.remove_option(i) {
            return false;
        }
        let last = self.poll.options().len() - 1;
        self.field = ComposerField::Option(i.min(last));
        true
    }

    /// Empty the composer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Build a post from the composer.
///
/// A blank body is allowed when a poll question is given. In poll mode the
/// poll must be complete: a question and two non-blank options.
pub fn create_post(
    composer: &Composer,
    author_id: &str,
    now: DateTime<Utc>,
) -> Result<Post, ComposeError> {
    let body = composer.body.value();
    if body.trim().is_empty() && !(composer.poll_mode && composer.poll.has_question()) {
        return Err(ComposeError::Empty);
    }

    let poll = if composer.poll_mode {
        Some(composer.poll.build()?)
    } else {
        None
    };

    let mut tags = extract_hashtags(body);
    if poll.is_some() {
        tags.push("Poll".to_string());
    }

    Ok(Post {
        id: Uuid::new_v4().to_string(),
        author_id: author_id.to_string(),
        content: body.to_string(),
        created_at: now,
        likes: 0,
        liked: false,
        tags,
        kind: PostKind::View,
        sentiment: None,
        poll,
        comment_count: 0,
        comments: Vec::new(),
    })
}

/// Feed state.
#[derive(Debug, Default)]
pub struct FeedState {
    /// Posts, newest first.
    pub posts: Vec<Post>,
    /// Selected post index.
    pub selected: usize,
    /// Posts with the comment thread expanded.
    pub expanded: HashSet<String>,
    /// Analyses by post ID.
    pub analyses: HashMap<String, AnalysisStatus>,
    /// Highlighted poll option of the selected post.
    pub poll_cursor: usize,
    /// Comment being written on the selected post.
    pub comment_input: TextInput,
    /// Post composer.
    pub composer: Composer,
    /// Whether the composer is open.
    pub composing: bool,
}

impl FeedState {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Default::default()
        }
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn post_mut(&mut self, id: &str) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    pub fn analysis(&self, post_id: &str) -> Option<&AnalysisStatus> {
        self.analyses.get(post_id)
    }

    pub fn comments_open(&self, post_id: &str) -> bool {
        self.expanded.contains(post_id)
    }

    /// Move the selection, clamped to the feed.
    pub fn select(&mut self, index: usize) {
        let max = self.posts.len().saturating_sub(1);
        let index = index.min(max);
        if index != self.selected {
            self.poll_cursor = 0;
            self.comment_input.clear();
        }
        self.selected = index;
    }

    /// Option ID under the poll cursor of the selected post.
    pub fn highlighted_option(&self) -> Option<&str> {
        let poll = self.selected_post()?.poll.as_ref()?;
        poll.options()
            .get(self.poll_cursor)
            .map(|o| o.id.as_str())
    }

    /// Posts by one author, newest first.
    pub fn posts_by<'a>(&'a self, author_id: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts.iter().filter(move |p| p.author_id == author_id)
    }
}

/// Human-readable age, e.g. `5m ago`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    match secs {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", secs / 60),
        3600..86_400 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    fn composer(body: &str) -> Composer {
        let mut c = Composer::default();
        c.body.set_value(body);
        c
    }

    #[test]
    fn test_create_post_extracts_tags() {
        let post = create_post(&composer("Long #INFY and #TCS, adding #INFY"), "1", Utc::now()).unwrap();
        assert_eq!(post.tags, vec!["INFY", "TCS", "INFY"]);
        assert!(post.poll.is_none());
        assert_eq!(post.author_id, "1");
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn test_empty_body_without_poll_is_refused() {
        assert_eq!(create_post(&composer("   "), "1", Utc::now()), Err(ComposeError::Empty));

        let mut c = composer("");
        c.toggle_poll_mode();
        assert_eq!(create_post(&c, "1", Utc::now()), Err(ComposeError::Empty));
    }

    #[test]
    fn test_poll_post() {
        let mut c = composer("");
        c.toggle_poll_mode();
        c.poll.question = "Nifty at 25k?".to_string();
        *c.poll.option_mut(0).unwrap() = "Yes".to_string();
        assert_eq!(
            create_post(&c, "1", Utc::now()),
            Err(ComposeError::Poll(PollError::TooFewOptions { found: 1 }))
        );

        *c.poll.option_mut(1).unwrap() = "No".to_string();
        let post = create_post(&c, "1", Utc::now()).unwrap();
        assert_eq!(post.tags, vec!["Poll"]);
        assert_eq!(post.poll.unwrap().options().len(), 2);
    }

    #[test]
    fn test_poll_mode_without_question_is_refused() {
        let mut c = composer("Just text #Nifty");
        c.toggle_poll_mode();
        assert_eq!(
            create_post(&c, "1", Utc::now()),
            Err(ComposeError::Poll(PollError::EmptyQuestion))
        );

        c.toggle_poll_mode();
        let post = create_post(&c, "1", Utc::now()).unwrap();
        assert!(post.poll.is_none());
        assert_eq!(post.tags, vec!["Nifty"]);
    }

    #[test]
    fn test_toggle_poll_mode_off_discards_draft() {
        let mut c = composer("");
        c.toggle_poll_mode();
        c.poll.question = "Q".to_string();
        c.poll.add_option();
        c.field = ComposerField::Option(2);

        c.toggle_poll_mode();
        assert!(!c.poll_mode);
        assert_eq!(c.poll, PollDraft::new());
        assert_eq!(c.field, ComposerField::Body);
    }

    #[test]
    fn test_insert_hashtag_appends() {
        let mut c = composer("Banks look strong");
        c.body.home();
        c.insert_hashtag();
        assert_eq!(c.body.value(), "Banks look strong #");
        assert_eq!(c.body.cursor(), c.body.len());
    }

    #[test]
    fn test_focus_cycles_through_poll_fields() {
        let mut c = composer("");
        c.focus_next();
        assert_eq!(c.field, ComposerField::Body);

        c.toggle_poll_mode();
        c.focus_next();
        assert_eq!(c.field, ComposerField::Question);
        c.focus_next();
        c.focus_next();
        assert_eq!(c.field, ComposerField::Option(1));
        c.focus_next();
        assert_eq!(c.field, ComposerField::Body);
        c.focus_prev();
        assert_eq!(c.field, ComposerField::Option(1));
    }

    #[test]
    fn test_remove_focused_option() {
        let mut c = composer("");
        c.toggle_poll_mode();
        c.poll.add_option();
        c.field = ComposerField::Option(2);
        assert!(c.remove_focused_option());
        assert_eq!(c.field, ComposerField::Option(1));
        assert!(!c.remove_focused_option());
    }

    #[test]
    fn test_toggle_like() {
        let mut post = create_post(&composer("hi"), "1", Utc::now()).unwrap();
        assert!(post.toggle_like());
        assert_eq!(post.likes, 1);
        assert!(!post.toggle_like());
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn test_relative_time() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "just now");
        assert_eq!(relative_time(now - TimeDelta::minutes(50), now), "50m ago");
        assert_eq!(relative_time(now - TimeDelta::hours(2), now), "2h ago");
        assert_eq!(relative_time(now - TimeDelta::days(3), now), "3d ago");
    }
}
