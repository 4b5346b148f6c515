//! Authoring and rendering of user content.
//!
//! - **Tokenizer**: ticker/hashtag/mention spans
//! - **Mention**: composer autocomplete
//! - **Poll**: poll lifecycle and drafts

pub mod mention;
pub mod poll;
pub mod tokenizer;

pub use mention::{KeyOutcome, MentionAutocomplete, MentionEdit, MentionState};
pub use poll::{Poll, PollDraft, PollError, PollOption, PollStatus, VoteOutcome};
pub use tokenizer::{SpanKind, TextSpan, extract_hashtags, primary_ticker, tokenize};
