//! Collaborator used when no AI service is configured.

use super::types::{Analysis, SUMMARY_FAILED};
use super::{ChatSummarizer, MarketLookup, SentimentAnalyzer};
use crate::market::{NewsItem, Quote};
use async_trait::async_trait;

/// Answers every request with the soft fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCollaborator;

#[async_trait]
impl SentimentAnalyzer for OfflineCollaborator {
    async fn analyze(&self, _text: &str) -> Analysis {
        Analysis::unavailable()
    }
}

#[async_trait]
impl ChatSummarizer for OfflineCollaborator {
    async fn summarize(&self, _lines: &[String]) -> String {
        SUMMARY_FAILED.to_string()
    }
}

#[async_trait]
impl MarketLookup for OfflineCollaborator {
    async fn quote(&self, _symbol: &str) -> Option<Quote> {
        None
    }

    async fn news(&self, _symbol: &str) -> Vec<NewsItem> {
        Vec::new()
    }
}
