//! AI collaborator integration.
//!
//! Sentiment analysis, chat summaries and quote/news lookup sit behind async
//! traits. Implementations never fail: errors degrade to fixed fallbacks so
//! the UI always has something to show.

mod client;
pub mod decode;
mod offline;
mod types;

pub use client::GenAiClient;
pub use decode::DecodeError;
pub use offline::OfflineCollaborator;
pub use types::{Analysis, SUMMARY_EMPTY, SUMMARY_FAILED, Sentiment};

use crate::config::AiConfig;
use crate::market::{NewsItem, Quote};
use async_trait::async_trait;
use std::sync::Arc;

/// Classifies a post and names its risks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Analysis;
}

/// Condenses a chat log into a short summary.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSummarizer: Send + Sync {
    async fn summarize(&self, lines: &[String]) -> String;
}

/// Live quote and headline lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketLookup: Send + Sync {
    async fn quote(&self, symbol: &str) -> Option<Quote>;
    async fn news(&self, symbol: &str) -> Vec<NewsItem>;
}

/// The collaborators the app talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub analyzer: Arc<dyn SentimentAnalyzer>,
    pub summarizer: Arc<dyn ChatSummarizer>,
    pub market: Arc<dyn MarketLookup>,
    online: bool,
}

impl Collaborators {
    /// Use the AI service when a key is configured, otherwise run offline.
    pub fn from_config(config: &AiConfig) -> Self {
        if config.api_key.is_none() {
            tracing::info!("No AI API key configured, running offline");
            return Self::offline();
        }

        match GenAiClient::new(config.clone()) {
            Ok(client) => {
                tracing::info!(model = %config.model, "AI service enabled");
                let client = Arc::new(client);
                Self {
                    analyzer: client.clone(),
                    summarizer: client.clone(),
                    market: client,
                    online: true,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI client unavailable, running offline");
                Self::offline()
            }
        }
    }

    pub fn offline() -> Self {
        let offline = Arc::new(OfflineCollaborator);
        Self {
            analyzer: offline.clone(),
            summarizer: offline.clone(),
            market: offline,
            online: false,
        }
    }

    /// Build from explicit implementations.
    pub fn new(
        analyzer: Arc<dyn SentimentAnalyzer>,
        summarizer: Arc<dyn ChatSummarizer>,
        market: Arc<dyn MarketLookup>,
    ) -> Self {
        Self {
            analyzer,
            summarizer,
            market,
            online: true,
        }
    }

    /// Whether a real AI service backs these collaborators.
    pub fn is_online(&self) -> bool {
        self.online
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("online", &self.online)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_key_runs_offline() {
        let collaborators = Collaborators::from_config(&AiConfig::default());
        assert!(!collaborators.is_online());
    }

    #[test]
    fn test_with_key_goes_online() {
        let config = AiConfig {
            api_key: Some("k".to_string()),
            ..AiConfig::default()
        };
        assert!(Collaborators::from_config(&config).is_online());
    }
}
