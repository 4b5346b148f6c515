//! Price chart of the selected post's ticker.

use crate::config::ChartConfig;
use crate::market::{LiveFeed, NewsItem, PriceSeries, Quote, TimeRange};
use rand::Rng;

/// How the series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Area,
    Line,
    Candle,
}

impl ChartKind {
    pub fn next(&self) -> Self {
        match self {
            Self::Area => Self::Line,
            Self::Line => Self::Candle,
            Self::Candle => Self::Area,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Area => "Area",
            Self::Line => "Line",
            Self::Candle => "Candle",
        }
    }
}

/// Chart panel state.
///
/// Owns the live feed: dropping the chart stops its ticks.
#[derive(Debug)]
pub struct ChartState {
    pub symbol: String,
    pub range: TimeRange,
    pub kind: ChartKind,
    /// Anchor quote. `None` while loading.
    pub quote: Option<Quote>,
    /// Whether the quote is the offline fallback.
    pub simulated: bool,
    pub series: Option<PriceSeries>,
    pub news: Vec<NewsItem>,
    live: Option<LiveFeed>,
}

impl ChartState {
    /// A chart waiting for its quote.
    pub fn loading(symbol: impl Into<String>, range: TimeRange, kind: ChartKind) -> Self {
        Self {
            symbol: symbol.into(),
            range,
            kind,
            quote: None,
            simulated: false,
            series: None,
            news: Vec::new(),
            live: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.quote.is_none()
    }

    /// Whether the live feed is running.
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Store the lookup result, falling back to a random anchor, and rebuild
    /// the series.
    pub fn load<R: Rng + ?Sized>(
        &mut self,
        quote: Option<Quote>,
        news: Vec<NewsItem>,
        config: &ChartConfig,
        rng: &mut R,
    ) {
        self.simulated = quote.is_none();
        let mut quote = quote.unwrap_or_else(|| Quote::fallback(config, rng));
        if quote.currency.trim().is_empty() {
            quote.currency = config.fallback_currency.clone();
        }
        self.quote = Some(quote);
        self.news = news;
        self.regenerate();
    }

    /// Switch range and rebuild the series from the current anchor.
    pub fn set_range(&mut self, range: TimeRange) {
        if range == self.range {
            return;
        }
        self.range = range;
        if !range.is_intraday() {
            self.stop_live();
        }
        self.regenerate();
    }

    /// Rebuild the series from the anchor quote.
    pub fn regenerate(&mut self) {
        if let Some(quote) = &self.quote {
            self.series = Some(PriceSeries::generate(
                self.symbol.clone(),
                self.range,
                quote.price,
                quote.change_percent,
            ));
        }
    }

    /// Whether live ticks apply to the current range.
    pub fn wants_live(&self) -> bool {
        self.range.is_intraday() && self.series.is_some()
    }

    pub fn start_live(&mut self, feed: LiveFeed) {
        self.live = Some(feed);
    }

    pub fn stop_live(&mut self) {
        self.live = None;
    }

    /// Apply a live tick for `symbol`. Ticks for another symbol or range are
    /// ignored.
    pub fn tick<R: Rng + ?Sized>(&mut self, symbol: &str, rng: &mut R) -> Option<f64> {
        if symbol != self.symbol || !self.range.is_intraday() {
            return None;
        }
        let close = self.series.as_mut()?.apply_tick(rng)?;
        if let Some(quote) = self.quote.as_mut() {
            quote.price = close;
        }
        Some(close)
    }
}
