//! Values exchanged with the AI collaborators.

use serde::{Deserialize, Serialize};

/// Market sentiment of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: Sentiment,
    /// Risks mentioned or implied by the post.
    pub risk: String,
    /// One-sentence summary.
    pub summary: String,
}

impl Analysis {
    /// Shown when the analyzer could not produce a result.
    pub fn unavailable() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            risk: "Could not analyze risks at this time.".to_string(),
            summary: "Analysis unavailable.".to_string(),
        }
    }
}

/// Summary shown when the summarizer failed.
pub const SUMMARY_FAILED: &str = "Unable to generate summary.";

/// Summary shown when the model replied with nothing.
pub const SUMMARY_EMPTY: &str = "No summary available.";
