//! Configuration settings for InvestMate.

use crate::market::TimeRange;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides, e.g. `INVESTMATE_AI__MODEL`.
const ENV_PREFIX: &str = "INVESTMATE";

/// Conventional variable holding the Gemini API key.
const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generative-AI service configuration.
    pub ai: AiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Price chart configuration.
    pub chart: ChartConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from a TOML file layered with environment overrides.
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_path);
        let mut settings = Self::from_sources(&config_path)?;

        if settings.ai.api_key.is_none() {
            settings.ai.api_key = std::env::var(GEMINI_KEY_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        tracing::debug!(
            path = %config_path.display(),
            ai_enabled = settings.ai.api_key.is_some(),
            "Configuration loaded"
        );
        Ok(settings)
    }

    fn from_sources(path: &Path) -> crate::Result<Self> {
        let layered = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(layered.try_deserialize()?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Write the default configuration when no file exists yet, so there is
    /// one to edit. Returns whether a file was written.
    pub fn write_default_if_missing(path: Option<PathBuf>) -> crate::Result<bool> {
        let config_path = path.unwrap_or_else(default_path);
        if config_path.exists() {
            return Ok(false);
        }
        Self::default().save(Some(config_path))?;
        Ok(true)
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Generative-AI service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Service base URL.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// API key. Without one the app runs offline with fallback content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Requests per second allowed by the client-side limiter.
    pub rate_limit: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            timeout_secs: 30,
            rate_limit: 2,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Interval of the simulated live quote on the intraday chart.
    pub live_tick_ms: u64,
    /// Delay before a simulated chat reply arrives.
    pub chat_reply_delay_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Show help bar.
    pub show_help_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            live_tick_ms: 2000,
            chat_reply_delay_ms: 2000,
            mouse_support: true,
            show_help_bar: true,
        }
    }
}

/// Price chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Range shown when a chart first opens.
    pub default_range: TimeRange,
    /// Lower bound of the anchor price used when no quote is available.
    pub fallback_price_min: f64,
    /// Upper bound (exclusive) of the fallback anchor price.
    pub fallback_price_max: f64,
    /// Currency assumed for fallback quotes.
    pub fallback_currency: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_range: TimeRange::OneDay,
            fallback_price_min: 1000.0,
            fallback_price_max: 1500.0,
            fallback_currency: "INR".to_string(),
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Switch to the feed.
    pub feed: String,
    /// Switch to the live chat.
    pub charcha: String,
    /// Switch to clubs.
    pub clubs: String,
    /// Switch to the leaderboard.
    pub leaderboard: String,
    /// Switch to own profile.
    pub profile: String,
    /// Start writing a post.
    pub compose: String,
    /// Like/unlike the selected post.
    pub like: String,
    /// Show/hide comments of the selected post.
    pub comments: String,
    /// Write a comment on the selected post.
    pub reply: String,
    /// Ask the AI to analyze the selected post.
    pub analyze: String,
    /// Highlight the next poll option.
    pub poll_option: String,
    /// Vote for the highlighted poll option.
    pub vote: String,
    /// Open the author's profile.
    pub author: String,
    /// Previous chart range.
    pub range_prev: String,
    /// Next chart range.
    pub range_next: String,
    /// Toggle line/candle chart.
    pub chart_kind: String,
    /// Start typing (chat message, club search).
    pub input: String,
    /// Summarize the chat.
    pub summarize: String,
    /// Cycle the club category filter.
    pub category: String,
    /// Edit own profile.
    pub edit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            feed: "1".to_string(),
            charcha: "2".to_string(),
            clubs: "3".to_string(),
            leaderboard: "4".to_string(),
            profile: "5".to_string(),
            compose: "n".to_string(),
            like: "l".to_string(),
            comments: "c".to_string(),
            reply: "r".to_string(),
            analyze: "a".to_string(),
            poll_option: "o".to_string(),
            vote: "v".to_string(),
            author: "u".to_string(),
            range_prev: "[".to_string(),
            range_next: "]".to_string(),
            chart_kind: "m".to_string(),
            input: "i".to_string(),
            summarize: "s".to_string(),
            category: "f".to_string(),
            edit: "e".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("absent.toml"))).unwrap();

        assert_eq!(config.ai.model, "gemini-2.5-flash");
        assert_eq!(config.ui.live_tick_ms, 2000);
        assert_eq!(config.chart.default_range, TimeRange::OneDay);
        assert_eq!(config.keybindings.vote, "v");
    }

    #[test]
    fn test_file_overrides_selected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[ui]\nlive_tick_ms = 500\n\n[chart]\ndefault_range = \"1M\"\nfallback_currency = \"USD\""
        )
        .unwrap();

        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.ui.live_tick_ms, 500);
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert_eq!(config.chart.default_range, TimeRange::OneMonth);
        assert_eq!(config.chart.fallback_currency, "USD");
    }

    #[test]
    fn test_default_file_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("investmate").join("config.toml");

        assert!(Config::write_default_if_missing(Some(path.clone())).unwrap());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("live_tick_ms = 2000"));
        assert!(!written.contains("api_key"));

        std::fs::write(&path, "[ui]\nlive_tick_ms = 750\n").unwrap();
        assert!(!Config::write_default_if_missing(Some(path.clone())).unwrap());
        assert_eq!(Config::load(Some(path)).unwrap().ui.live_tick_ms, 750);
    }

    #[test]
    fn test_save_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ai.timeout_secs = 12;
        config.keybindings.compose = "w".to_string();
        config.save(Some(path.clone())).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.ai.timeout_secs, 12);
        assert_eq!(loaded.keybindings.compose, "w");
    }
}
