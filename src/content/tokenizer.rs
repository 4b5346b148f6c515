//! Splits post and comment bodies into ticker, hashtag and mention spans.
//!
//! The grammar is shared by rendering, tag extraction on post creation and
//! chart attachment:
//!
//! - ticker: `$` followed by upper-case letters or digits (`$INFY`, `$X`)
//! - hashtag: `#` followed by word characters (`#FedMeet`)
//! - mention: `@` followed by word characters (`@rahul_t`)

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$[A-Z0-9]+|#[A-Za-z0-9_]+|@[A-Za-z0-9_]+").expect("token pattern is valid")
});

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)").expect("hashtag pattern is valid"));

static TICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[A-Z0-9]+").expect("ticker pattern is valid"));

/// Kind of a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanKind {
    Plain,
    Ticker,
    Hashtag,
    Mention,
}

impl SpanKind {
    fn from_trigger(c: char) -> Self {
        match c {
            '$' => Self::Ticker,
            '#' => Self::Hashtag,
            '@' => Self::Mention,
            _ => Self::Plain,
        }
    }
}

/// A contiguous labeled substring of a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl TextSpan {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Plain, text)
    }
}

/// Split `text` into spans. Concatenating the span texts yields `text`.
pub fn tokenize(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut last = 0;

    for m in TOKEN_RE.find_iter(text) {
        if m.start() > last {
            spans.push(TextSpan::plain(&text[last..m.start()]));
        }
        let kind = m
            .as_str()
            .chars()
            .next()
            .map(SpanKind::from_trigger)
            .unwrap_or(SpanKind::Plain);
        spans.push(TextSpan::new(kind, m.as_str()));
        last = m.end();
    }

    if last < text.len() {
        spans.push(TextSpan::plain(&text[last..]));
    }

    spans
}

/// Hashtag names (without `#`) in order of occurrence, duplicates kept.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Ticker symbols (with `$`) in order of occurrence.
pub fn extract_tickers(text: &str) -> Vec<String> {
    TICKER_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The ticker that gets a chart: the earliest one in the body.
pub fn primary_ticker(text: &str) -> Option<&str> {
    TICKER_RE.find(text).map(|m| m.as_str())
}

/// Strip the `$` trigger from a ticker for lookups.
pub fn bare_symbol(ticker: &str) -> &str {
    ticker.strip_prefix('$').unwrap_or(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn joined(spans: &[TextSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_classifies_each_trigger() {
        let spans = tokenize("$ABC123 text #tag1 @user more $X");
        assert_eq!(
            spans,
            vec![
                TextSpan::new(SpanKind::Ticker, "$ABC123"),
                TextSpan::plain(" text "),
                TextSpan::new(SpanKind::Hashtag, "#tag1"),
                TextSpan::plain(" "),
                TextSpan::new(SpanKind::Mention, "@user"),
                TextSpan::plain(" more "),
                TextSpan::new(SpanKind::Ticker, "$X"),
            ]
        );
    }

    #[test]
    fn test_round_trip_reconstructs_input() {
        let inputs = [
            "",
            "plain words only",
            "$",
            "#",
            "@",
            "$$INFY",
            "email@example.com and #tag#tag2",
            "lowercase $infy is not a ticker",
            "unicode ₹1,450 — Ünïcödé #तकनीक @名前",
            "multi\nline\n$TCS\n",
            "trailing trigger $TCS$",
        ];

        for input in inputs {
            assert_eq!(joined(&tokenize(input)), input, "input: {input:?}");
        }
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let text = "Watch $INFY @priya_i #IT";
        assert_eq!(tokenize(text), tokenize(text));
    }

    #[test]
    fn test_lowercase_dollar_stays_plain() {
        assert_eq!(tokenize("$infy"), vec![TextSpan::plain("$infy")]);
    }

    #[test]
    fn test_bare_triggers_are_plain() {
        let spans = tokenize("a # b @ c $ d");
        assert_eq!(spans, vec![TextSpan::plain("a # b @ c $ d")]);
        assert!(spans.iter().all(|s| s.kind == SpanKind::Plain));
    }

    #[test]
    fn test_spans_are_maximal() {
        let spans = tokenize("#abc_def!");
        assert_eq!(spans[0], TextSpan::new(SpanKind::Hashtag, "#abc_def"));
        assert_eq!(spans[1], TextSpan::plain("!"));
    }

    #[test]
    fn test_extract_hashtags_keeps_order_and_duplicates() {
        assert_eq!(
            extract_hashtags("Loving #INFY and #TCS today #INFY"),
            vec!["INFY", "TCS", "INFY"]
        );
        assert!(extract_hashtags("no tags here").is_empty());
    }

    #[test]
    fn test_primary_ticker_is_earliest() {
        let body = "RSI divergence on $INFY and $TCS";
        assert_eq!(extract_tickers(body), vec!["$INFY", "$TCS"]);
        assert_eq!(primary_ticker(body), Some("$INFY"));
        assert_eq!(primary_ticker("nothing to chart"), None);
    }

    #[test]
    fn test_bare_symbol() {
        assert_eq!(bare_symbol("$TCS"), "TCS");
        assert_eq!(bare_symbol("TCS"), "TCS");
    }
}
