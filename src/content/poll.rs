//! Polls attached to posts.
//!
//! A poll is open until the viewer votes, then closed for good. The vote tally
//! always equals the sum of option votes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fewest options a poll may have.
pub const MIN_OPTIONS: usize = 2;
/// Most options the composer collects.
pub const MAX_OPTIONS: usize = 4;

/// Reasons a poll cannot be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    #[error("poll question is empty")]
    EmptyQuestion,
    #[error("poll needs at least {MIN_OPTIONS} options, got {found}")]
    TooFewOptions { found: usize },
}

/// Whether the viewer can still vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Open,
    Closed,
}

impl std::fmt::Display for PollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Poll Open"),
            Self::Closed => write!(f, "Voting Closed"),
        }
    }
}

/// Result of a vote attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded,
    AlreadyVoted,
    UnknownOption,
}

/// One answer of a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub votes: u32,
}

/// A poll and its tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    question: String,
    options: Vec<PollOption>,
    total_votes: u32,
    viewer_vote: Option<String>,
}

impl Poll {
    /// Create an open poll from the composer's inputs.
    ///
    /// Blank options are dropped; the rest get fresh IDs.
    pub fn create<S: AsRef<str>>(question: &str, option_texts: &[S]) -> Result<Self, PollError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(PollError::EmptyQuestion);
        }

        let options: Vec<PollOption> = option_texts
            .iter()
            .map(|text| text.as_ref().trim())
            .filter(|text| !text.is_empty())
            .map(|text| PollOption {
                id: format!("opt_{}", Uuid::new_v4().simple()),
                text: text.to_string(),
                votes: 0,
            })
            .collect();

        if options.len() < MIN_OPTIONS {
            return Err(PollError::TooFewOptions {
                found: options.len(),
            });
        }

        Ok(Self {
            question: question.to_string(),
            options,
            total_votes: 0,
            viewer_vote: None,
        })
    }

    /// Rebuild a poll with existing tallies (seed data).
    ///
    /// The total is derived from the options so the invariant holds.
    pub fn with_votes(
        question: impl Into<String>,
        options: Vec<PollOption>,
        viewer_vote: Option<String>,
    ) -> Self {
        let total_votes = options.iter().map(|o| o.votes).sum();
        let viewer_vote = viewer_vote.filter(|id| options.iter().any(|o| &o.id == id));
        Self {
            question: question.into(),
            options,
            total_votes,
            viewer_vote,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    pub fn total_votes(&self) -> u32 {
        self.total_votes
    }

    pub fn viewer_vote(&self) -> Option<&str> {
        self.viewer_vote.as_deref()
    }

    pub fn status(&self) -> PollStatus {
        if self.viewer_vote.is_some() {
            PollStatus::Closed
        } else {
            PollStatus::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == PollStatus::Open
    }

    /// Cast the viewer's single vote. Closed polls and unknown options are
    /// left untouched.
    pub fn vote(&mut self, option_id: &str) -> VoteOutcome {
        if !self.is_open() {
            return VoteOutcome::AlreadyVoted;
        }

        let Some(option) = self.options.iter_mut().find(|o| o.id == option_id) else {
            return VoteOutcome::UnknownOption;
        };

        option.votes += 1;
        self.total_votes += 1;
        self.viewer_vote = Some(option_id.to_string());
        VoteOutcome::Recorded
    }

    /// Share of the vote for an option, rounded to a whole percent.
    pub fn percentage(&self, option: &PollOption) -> u32 {
        if self.total_votes == 0 {
            return 0;
        }
        (option.votes as f64 / self.total_votes as f64 * 100.0).round() as u32
    }
}

/// Poll being written in the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    options: Vec<String>,
}

impl Default for PollDraft {
    fn default() -> Self {
        Self {
            question: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
        }
    }
}

impl PollDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option_mut(&mut self, index: usize) -> Option<&mut String> {
        self.options.get_mut(index)
    }

    /// Add an empty option. Returns false at the cap.
    pub fn add_option(&mut self) -> bool {
        if self.options.len() >= MAX_OPTIONS {
            return false;
        }
        self.options.push(String::new());
        true
    }

    /// Remove an option. Returns false at the floor or for a bad index.
    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_OPTIONS || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    /// Whether the question has been filled in.
    pub fn has_question(&self) -> bool {
        !self.question.trim().is_empty()
    }

    /// Build the poll.
    pub fn build(&self) -> Result<Poll, PollError> {
        Poll::create(&self.question, self.options.as_slice())
    }
}
