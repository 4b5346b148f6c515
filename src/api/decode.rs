//! Strict decoding of model replies.
//!
//! Model text is reduced to the JSON value it is supposed to contain, then
//! deserialized into typed structs that reject missing required fields.
//! Anything else is a [`DecodeError`], which callers turn into their soft
//! fallback.

use super::types::Analysis;
use crate::market::{NewsItem, Quote};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a reply could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("reply contained no text")]
    Empty,

    #[error("no JSON {0} found in reply")]
    NotFound(&'static str),

    #[error("reply does not match schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("price must be finite and positive, got {0}")]
    InvalidPrice(f64),
}

/// Envelope of a `generateContent` response.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: Content,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated. Empty when absent.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Decode a sentiment analysis object.
pub fn analysis(text: &str) -> Result<Analysis, DecodeError> {
    let json = locate(text, '{', '}').ok_or(DecodeError::NotFound("object"))?;
    parse(json)
}

/// Decode a quote object. Only the price is required, and it must be finite
/// and positive.
pub fn quote(text: &str) -> Result<Quote, DecodeError> {
    let json = locate(text, '{', '}').ok_or(DecodeError::NotFound("object"))?;
    let quote: Quote = parse(json)?;
    if !quote.price.is_finite() || quote.price <= 0.0 {
        return Err(DecodeError::InvalidPrice(quote.price));
    }
    Ok(quote)
}

/// Decode an array of news items.
pub fn news(text: &str) -> Result<Vec<NewsItem>, DecodeError> {
    let json = locate(text, '[', ']').ok_or(DecodeError::NotFound("array"))?;
    parse(json)
}

fn parse<T: DeserializeOwned>(json: &str) -> Result<T, DecodeError> {
    Ok(serde_json::from_str(json)?)
}

/// The span from the first `open` to the last `close`, after removing
/// markdown code fences.
fn locate(text: &str, open: char, close: char) -> Option<&str> {
    let body = strip_fences(text);
    if body.is_empty() {
        return None;
    }
    let start = body.find(open)?;
    let end = body.rfind(close)?;
    (end > start).then(|| &body[start..=end])
}

fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string, e.g. "json"
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Sentiment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_analysis_plain_json() {
        let decoded = analysis(
            r#"{"sentiment":"Bullish","risk":"Rate hikes","summary":"Expects a rally."}"#,
        )
        .unwrap();
        assert_eq!(
            decoded,
            Analysis {
                sentiment: Sentiment::Bullish,
                risk: "Rate hikes".to_string(),
                summary: "Expects a rally.".to_string(),
            }
        );
    }

    #[test]
    fn test_fenced_json_decodes() {
        let text = "```json\n{ \"price\": 1450.20, \"changePercent\": 1.5, \"currency\": \"INR\" }\n```";
        let q = quote(text).unwrap();
        assert_eq!(q.price, 1450.20);
        assert_eq!(q.change_percent, 1.5);
        assert_eq!(q.currency, "INR");
    }

    #[test]
    fn test_json_inside_prose_decodes() {
        let text = "Here you go: [{\"title\":\"TCS wins deal\",\"source\":\"Mint\",\"timeAgo\":\"1h ago\",\"url\":\"https://example.com\"}] Hope this helps.";
        let items = news(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].time_ago, "1h ago");
    }

    #[test]
    fn test_missing_field_fails() {
        let err = analysis(r#"{"sentiment":"Bullish","risk":"none"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Schema(_)));

        let err = quote(r#"{"changePercent": 1.0, "currency": "USD"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Schema(_)));
    }

    #[test]
    fn test_quote_needs_only_a_price() {
        let q = quote(r#"{"price": 10.5}"#).unwrap();
        assert_eq!(q.price, 10.5);
        assert_eq!(q.change_percent, 0.0);
        assert_eq!(q.currency, "");

        let q = quote(r#"{"price": 98.1, "currency": "USD"}"#).unwrap();
        assert_eq!(q.currency, "USD");
    }

    #[test]
    fn test_unknown_sentiment_fails() {
        let err = analysis(r#"{"sentiment":"Euphoric","risk":"-","summary":"-"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Schema(_)));
    }

    #[test]
    fn test_non_positive_price_fails() {
        let err = quote(r#"{"price": 0, "changePercent": 0, "currency": "INR"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPrice(p) if p == 0.0));

        let err = quote(r#"{"price": -3.5, "changePercent": 0, "currency": "INR"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPrice(_)));
    }

    #[test]
    fn test_no_json_found() {
        assert!(matches!(quote("sorry, market closed"), Err(DecodeError::NotFound("object"))));
        assert!(matches!(news("nothing"), Err(DecodeError::NotFound("array"))));
        assert!(matches!(news(""), Err(DecodeError::NotFound(_))));
    }

    #[test]
    fn test_envelope_text() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text(), "Hello world");

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");
    }
}
