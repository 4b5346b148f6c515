//! Generative-AI service client.

use super::decode::{self, DecodeError, GenerateResponse};
use super::types::{Analysis, SUMMARY_EMPTY, SUMMARY_FAILED};
use super::{ChatSummarizer, MarketLookup, SentimentAnalyzer};
use crate::config::AiConfig;
use crate::error::{Error, Result};
use crate::market::{NewsItem, Quote};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the `generateContent` endpoint.
pub struct GenAiClient {
    /// Configuration.
    config: AiConfig,
    /// API key.
    api_key: String,
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Rate limiter state.
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl std::fmt::Debug for GenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl GenAiClient {
    /// Create a client. Fails without an API key.
    pub fn new(config: AiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::config("AI API key is not set"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        let rate_limiter = Arc::new(RwLock::new(RateLimiter::new(config.rate_limit.max(1))));

        Ok(Self {
            config,
            api_key,
            http,
            rate_limiter,
        })
    }

    /// Endpoint URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Analyze a post, propagating failures.
    pub async fn try_analyze(&self, text: &str) -> Result<Analysis> {
        let request = GenerateRequest::json(analysis_prompt(text), analysis_schema());
        let reply = self.generate(&request).await?;
        Ok(decode::analysis(non_empty(&reply)?)?)
    }

    /// Summarize chat lines. An empty reply yields the "no summary" text.
    pub async fn try_summarize(&self, lines: &[String]) -> Result<String> {
        let request = GenerateRequest::text(summary_prompt(lines));
        let reply = self.generate(&request).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Ok(SUMMARY_EMPTY.to_string());
        }
        Ok(reply.to_string())
    }

    /// Look up a quote with search grounding.
    pub async fn try_quote(&self, symbol: &str) -> Result<Quote> {
        let request = GenerateRequest::grounded(quote_prompt(symbol));
        let reply = self.generate(&request).await?;
        Ok(decode::quote(non_empty(&reply)?)?)
    }

    /// Look up headlines with search grounding.
    pub async fn try_news(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        let request = GenerateRequest::grounded(news_prompt(symbol));
        let reply = self.generate(&request).await?;
        Ok(decode::news(non_empty(&reply)?)?)
    }

    /// Send a request and return the reply text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        self.rate_limit().await?;

        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(1);
            return Err(Error::RateLimited(retry_after));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.text())
    }

    /// Apply rate limiting.
    async fn rate_limit(&self) -> Result<()> {
        let mut limiter = self.rate_limiter.write().await;
        limiter.wait().await
    }
}

#[async_trait]
impl SentimentAnalyzer for GenAiClient {
    async fn analyze(&self, text: &str) -> Analysis {
        self.try_analyze(text).await.unwrap_or_else(|e| {
            report("Sentiment analysis", &e);
            Analysis::unavailable()
        })
    }
}

#[async_trait]
impl ChatSummarizer for GenAiClient {
    async fn summarize(&self, lines: &[String]) -> String {
        self.try_summarize(lines).await.unwrap_or_else(|e| {
            report("Chat summary", &e);
            SUMMARY_FAILED.to_string()
        })
    }
}

#[async_trait]
impl MarketLookup for GenAiClient {
    async fn quote(&self, symbol: &str) -> Option<Quote> {
        match self.try_quote(symbol).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                report(&format!("Quote lookup for {symbol}"), &e);
                None
            }
        }
    }

    async fn news(&self, symbol: &str) -> Vec<NewsItem> {
        self.try_news(symbol).await.unwrap_or_else(|e| {
            report(&format!("News lookup for {symbol}"), &e);
            Vec::new()
        })
    }
}

/// Log a failed request before its fallback is used. Transient failures are
/// warnings; anything else points at configuration or a broken reply.
fn report(what: &str, error: &Error) {
    if error.is_recoverable() {
        tracing::warn!(error = %error, "{what} failed");
    } else {
        tracing::error!(error = %error, "{what} failed");
    }
}

fn non_empty(reply: &str) -> std::result::Result<&str, DecodeError> {
    if reply.trim().is_empty() {
        Err(DecodeError::Empty)
    } else {
        Ok(reply)
    }
}

/// Body of a `generateContent` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
}

impl GenerateRequest {
    fn text(prompt: String) -> Self {
        Self {
            contents: vec![json!({ "parts": [{ "text": prompt }] })],
            generation_config: None,
            tools: None,
        }
    }

    /// Structured output constrained by a response schema.
    fn json(prompt: String, schema: Value) -> Self {
        Self {
            generation_config: Some(json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            })),
            ..Self::text(prompt)
        }
    }

    /// Search-grounded request. Grounding does not support a response schema.
    fn grounded(prompt: String) -> Self {
        Self {
            tools: Some(vec![json!({ "google_search": {} })]),
            ..Self::text(prompt)
        }
    }
}

fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": { "type": "STRING", "enum": ["Bullish", "Bearish", "Neutral"] },
            "risk": { "type": "STRING", "description": "Potential risks identified" },
            "summary": { "type": "STRING", "description": "A one sentence summary" }
        },
        "required": ["sentiment", "risk", "summary"]
    })
}

fn analysis_prompt(text: &str) -> String {
    format!(
        "Analyze the following stock market post from an investor community.\n\
         Determine the sentiment (Bullish, Bearish, or Neutral), identify any potential \
         risks mentioned or implied, and provide a very short 1-sentence summary.\n\n\
         Post: \"{text}\""
    )
}

fn summary_prompt(lines: &[String]) -> String {
    format!(
        "Summarize the key market trends and discussion points from this chat log in \
         3 bullet points. Keep it concise for a trader.\n\nChat Log:\n{}",
        lines.join("\n")
    )
}

fn quote_prompt(symbol: &str) -> String {
    let symbol = crate::content::tokenizer::bare_symbol(symbol);
    format!(
        "Find the current real-time stock price and percentage change for {symbol} \
         (NSE/BSE preferred if Indian, otherwise US).\n\
         Output ONLY a raw JSON object with these exact keys: \"price\" (number), \
         \"changePercent\" (number), \"currency\" (string).\n\
         Example output: {{ \"price\": 1450.20, \"changePercent\": 1.5, \"currency\": \"INR\" }}\n\
         Do not include markdown formatting or explanations."
    )
}

fn news_prompt(symbol: &str) -> String {
    let symbol = crate::content::tokenizer::bare_symbol(symbol);
    format!(
        "Find the top 2 latest financial news headlines for {symbol}.\n\
         Return a strict JSON array (no markdown) where each object has:\n\
         \"title\" (string),\n\"source\" (string, e.g. Bloomberg),\n\
         \"timeAgo\" (string, e.g. \"1h ago\"),\n\"url\" (string)."
    )
}

/// Simple rate limiter.
struct RateLimiter {
    requests_per_second: u32,
    last_request: std::time::Instant,
    tokens: f64,
}

impl RateLimiter {
    fn new(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            last_request: std::time::Instant::now(),
            tokens: requests_per_second as f64,
        }
    }

    async fn wait(&mut self) -> Result<()> {
        let now = std::time::Instant::now();
        let elapsed = now.duration_since(self.last_request).as_secs_f64();

        // Replenish tokens
        self.tokens = (self.tokens + elapsed * self.requests_per_second as f64)
            .min(self.requests_per_second as f64);

        if self.tokens < 1.0 {
            let wait_time = (1.0 - self.tokens) / self.requests_per_second as f64;
            tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
            self.tokens = 1.0;
        }

        self.tokens -= 1.0;
        self.last_request = std::time::Instant::now();

        Ok(())
    }
}
